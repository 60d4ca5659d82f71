use super::parse_column;
use chrono::{DateTime, Utc};
use kernel::model::{
    event::{Event, EventStatus},
    id::{EventId, UserId},
    user::EventOrganizer,
};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

// イベント一覧・詳細の取得に使う型
// 主催者の情報と、現在の登録者数（Registered のみ）を含む
#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub organizer_id: UserId,
    pub organizer_name: String,
    pub organizer_email: String,
    pub event_name: String,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub description: String,
    pub max_students: i32,
    pub total_budget: Decimal,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub registered_count: i64,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> AppResult<Self> {
        let EventRow {
            event_id,
            organizer_id,
            organizer_name,
            organizer_email,
            event_name,
            date_time,
            venue,
            description,
            max_students,
            total_budget,
            status,
            rejection_reason,
            created_at,
            registered_count,
        } = value;
        Ok(Event {
            event_id,
            organizer: EventOrganizer {
                organizer_id,
                organizer_name,
                organizer_email,
            },
            event_name,
            date_time,
            venue,
            description,
            max_students,
            total_budget,
            status: parse_column("events.status", &status)?,
            rejection_reason,
            created_at,
            registered_count,
        })
    }
}

// 更新系の処理でロックを取得した行の状態を確認するための型
#[derive(sqlx::FromRow)]
pub struct EventStateRow {
    pub organizer_id: UserId,
    pub event_name: String,
    pub date_time: DateTime<Utc>,
    pub max_students: i32,
    pub total_budget: Decimal,
    pub status: String,
}

impl EventStateRow {
    pub fn status(&self) -> AppResult<EventStatus> {
        parse_column("events.status", &self.status)
    }
}
