use crate::model::{id::UserId, role::Role};
pub mod event;

pub struct AccessToken(pub String);

// Access Gate が検証済みのリクエストに付与する呼び出し元の情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessIdentity {
    pub user_id: UserId,
    pub role: Role,
}

impl AccessIdentity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins manage every event; organizers only the ones they own.
    pub fn can_manage(&self, owner: UserId) -> bool {
        self.is_admin() || self.user_id == owner
    }
}
