use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::Registration,
};
use shared::error::{AppError, AppResult};

#[derive(sqlx::FromRow)]
pub struct RegistrationRow {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub student_name: String,
    pub email_id: String,
    pub event_name: String,
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = AppError;

    fn try_from(value: RegistrationRow) -> AppResult<Self> {
        let RegistrationRow {
            registration_id,
            user_id,
            event_id,
            student_name,
            email_id,
            event_name,
            status,
            registered_at,
        } = value;
        Ok(Registration {
            registration_id,
            user_id,
            event_id,
            student_name,
            email_id,
            event_name,
            status: parse_column("registrations.status", &status)?,
            registered_at,
        })
    }
}

// 参加登録時にスナップショットとして保存する学生の情報
#[derive(sqlx::FromRow)]
pub struct StudentSnapshotRow {
    pub name: String,
    pub email: String,
}
