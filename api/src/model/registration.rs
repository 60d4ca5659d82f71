use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::Registration,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationsResponse {
    pub items: Vec<RegistrationResponse>,
}

impl From<Vec<Registration>> for RegistrationsResponse {
    fn from(value: Vec<Registration>) -> Self {
        Self {
            items: value.into_iter().map(RegistrationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub student_name: String,
    pub email_id: String,
    pub event_name: String,
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration {
            registration_id,
            user_id,
            event_id,
            student_name,
            email_id,
            event_name,
            status,
            registered_at,
        } = value;
        Self {
            registration_id,
            user_id,
            event_id,
            student_name,
            email_id,
            event_name,
            status: status.to_string(),
            registered_at,
        }
    }
}
