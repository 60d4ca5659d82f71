use super::{require_text, validate_budget, validate_capacity, EventStatus};
use crate::model::{auth::AccessIdentity, id::EventId};
use chrono::{DateTime, Utc};
use derive_new::new;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

#[derive(Debug, new)]
pub struct CreateEvent {
    pub organizer: AccessIdentity,
    pub event_name: String,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub description: String,
    pub max_students: i32,
    pub total_budget: Decimal,
}

impl CreateEvent {
    pub fn validate(&self) -> AppResult<()> {
        if !self.organizer.role.can_organize() {
            return Err(AppError::ForbiddenOperation(
                "イベントを作成できるのは主催者または管理者のみです".into(),
            ));
        }
        require_text("event_name", &self.event_name)?;
        require_text("venue", &self.venue)?;
        validate_capacity(self.max_students)?;
        validate_budget(self.total_budget)
    }
}

// None のフィールドは更新しない
#[derive(Debug, new)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub event_name: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub max_students: Option<i32>,
    pub total_budget: Option<Decimal>,
    pub requested_user: AccessIdentity,
}

impl UpdateEvent {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.event_name {
            require_text("event_name", name)?;
        }
        if let Some(venue) = &self.venue {
            require_text("venue", venue)?;
        }
        if let Some(max_students) = self.max_students {
            validate_capacity(max_students)?;
        }
        if let Some(total_budget) = self.total_budget {
            validate_budget(total_budget)?;
        }
        Ok(())
    }

    /// Renaming or rescheduling has to pass the duplicate-submission guard again.
    pub fn touches_identity(&self) -> bool {
        self.event_name.is_some() || self.date_time.is_some()
    }
}

#[derive(Debug, new)]
pub struct TransitionEventStatus {
    pub event_id: EventId,
    pub target: EventStatus,
    pub reason: Option<String>,
    pub requested_user: AccessIdentity,
}

impl TransitionEventStatus {
    /// Checks the request and returns the rejection reason to store
    /// (`None` when approving).
    pub fn validate(&self) -> AppResult<Option<&str>> {
        if !self.requested_user.is_admin() {
            return Err(AppError::ForbiddenOperation(
                "イベントの承認・却下は管理者のみ実行できます".into(),
            ));
        }
        match self.target {
            EventStatus::Approved => Ok(None),
            EventStatus::Rejected => match self.reason.as_deref().map(str::trim) {
                Some(reason) if !reason.is_empty() => Ok(Some(reason)),
                _ => Err(AppError::ValidationError(
                    "イベントを却下する場合は理由（reason）が必須です".into(),
                )),
            },
            EventStatus::Pending => Err(AppError::ValidationError(
                "遷移先のステータスは approved または rejected のみ指定できます".into(),
            )),
        }
    }
}

#[derive(Debug, new)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: AccessIdentity,
}
