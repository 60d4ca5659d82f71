use crate::model::{
    id::{EventId, UserId},
    user::EventOrganizer,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

// events.status カラムの値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    /// Pending and approved events take part in the duplicate-submission guard.
    pub fn is_active(self) -> bool {
        matches!(self, EventStatus::Pending | EventStatus::Approved)
    }

    pub fn ensure_editable(self) -> AppResult<()> {
        match self {
            EventStatus::Pending => Ok(()),
            other => Err(AppError::InvalidState(format!(
                "承認待ち（pending）のイベントのみ編集できます（現在のステータス: {other}）"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: EventId,
    pub organizer: EventOrganizer,
    pub event_name: String,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub description: String,
    pub max_students: i32,
    pub total_budget: Decimal,
    pub status: EventStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub registered_count: i64,
}

impl Event {
    pub fn organizer_id(&self) -> UserId {
        self.organizer.organizer_id
    }

    pub fn remaining_seats(&self) -> i64 {
        (i64::from(self.max_students) - self.registered_count).max(0)
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{field} は必須です")));
    }
    Ok(())
}

pub(crate) fn validate_capacity(max_students: i32) -> AppResult<()> {
    if max_students < 1 {
        return Err(AppError::ValidationError(format!(
            "max_students は 1 以上である必要があります（指定値: {max_students}）"
        )));
    }
    Ok(())
}

pub(crate) fn validate_budget(total_budget: Decimal) -> AppResult<()> {
    validate_amount("total_budget", total_budget)
}

/// Upper bound of a `NUMERIC(12, 2)` column.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

// 金額カラム（NUMERIC(12, 2)）に収まる値かを確認する
pub(crate) fn validate_amount(field: &str, amount: Decimal) -> AppResult<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::ValidationError(format!(
            "{field} は 0 以上である必要があります（指定値: {amount}）"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::ValidationError(format!(
            "{field} は {MAX_AMOUNT} 以下である必要があります（指定値: {amount}）"
        )));
    }
    if amount.normalize().scale() > 2 {
        return Err(AppError::ValidationError(format!(
            "{field} は小数点以下 2 桁までで指定してください（指定値: {amount}）"
        )));
    }
    Ok(())
}
