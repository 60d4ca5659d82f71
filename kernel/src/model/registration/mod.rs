use crate::model::id::{EventId, RegistrationId, UserId};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

// registrations.status カラムの値（既存データに合わせて先頭大文字）
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
pub enum RegistrationStatus {
    Registered,
    Cancelled,
}

// 登録時点の学生名・メールアドレス・イベント名のスナップショットを保持する
#[derive(Debug, Clone)]
pub struct Registration {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub student_name: String,
    pub email_id: String,
    pub event_name: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

/// Admission control: a new Registered row may only be inserted while the
/// number of Registered rows is below the event's capacity.
pub fn ensure_seat_available(max_students: i32, current_registered: i64) -> AppResult<()> {
    if current_registered >= i64::from(max_students) {
        return Err(AppError::CapacityExceeded(format!(
            "定員に達しているため登録できません（定員: {max_students}、登録済み: {current_registered}）"
        )));
    }
    Ok(())
}
