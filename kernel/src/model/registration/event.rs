use crate::model::id::{EventId, UserId};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateRegistration {
    pub user_id: UserId,
    pub event_id: EventId,
}

#[derive(Debug, new)]
pub struct CancelRegistration {
    pub user_id: UserId,
    pub event_id: EventId,
}
