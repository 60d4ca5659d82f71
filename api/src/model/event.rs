use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::AccessIdentity,
    event::{
        event::{CreateEvent, TransitionEventStatus, UpdateEvent},
        Event, EventStatus,
    },
    id::EventId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use super::user::EventOrganizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatusName {
    Pending,
    Approved,
    Rejected,
}

impl From<EventStatus> for EventStatusName {
    fn from(value: EventStatus) -> Self {
        match value {
            EventStatus::Pending => Self::Pending,
            EventStatus::Approved => Self::Approved,
            EventStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<EventStatusName> for EventStatus {
    fn from(value: EventStatusName) -> Self {
        match value {
            EventStatusName::Pending => Self::Pending,
            EventStatusName::Approved => Self::Approved,
            EventStatusName::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub event_name: String,
    #[garde(skip)]
    pub date_time: DateTime<Utc>,
    #[garde(length(min = 1))]
    pub venue: String,
    #[serde(default)]
    #[garde(skip)]
    pub description: String,
    #[garde(range(min = 1))]
    pub max_students: i32,
    #[garde(skip)]
    pub total_budget: Decimal,
}

#[derive(new)]
pub struct CreateEventRequestWithOrganizer(AccessIdentity, CreateEventRequest);
impl From<CreateEventRequestWithOrganizer> for CreateEvent {
    fn from(value: CreateEventRequestWithOrganizer) -> Self {
        let CreateEventRequestWithOrganizer(
            organizer,
            CreateEventRequest {
                event_name,
                date_time,
                venue,
                description,
                max_students,
                total_budget,
            },
        ) = value;
        CreateEvent {
            organizer,
            event_name,
            date_time,
            venue,
            description,
            max_students,
            total_budget,
        }
    }
}

// 指定されたフィールドのみ更新する
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 1))]
    pub event_name: Option<String>,
    #[garde(skip)]
    pub date_time: Option<DateTime<Utc>>,
    #[garde(length(min = 1))]
    pub venue: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(range(min = 1))]
    pub max_students: Option<i32>,
    #[garde(skip)]
    pub total_budget: Option<Decimal>,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, AccessIdentity, UpdateEventRequest);
impl From<UpdateEventRequestWithIds> for UpdateEvent {
    fn from(value: UpdateEventRequestWithIds) -> Self {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            UpdateEventRequest {
                event_name,
                date_time,
                venue,
                description,
                max_students,
                total_budget,
            },
        ) = value;
        UpdateEvent {
            event_id,
            event_name,
            date_time,
            venue,
            description,
            max_students,
            total_budget,
            requested_user,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventStatusRequest {
    #[garde(skip)]
    pub status: EventStatusName,
    #[garde(skip)]
    pub reason: Option<String>,
}

#[derive(new)]
pub struct UpdateEventStatusRequestWithIds(EventId, AccessIdentity, UpdateEventStatusRequest);
impl From<UpdateEventStatusRequestWithIds> for TransitionEventStatus {
    fn from(value: UpdateEventStatusRequestWithIds) -> Self {
        let UpdateEventStatusRequestWithIds(
            event_id,
            requested_user,
            UpdateEventStatusRequest { status, reason },
        ) = value;
        TransitionEventStatus {
            event_id,
            target: EventStatus::from(status),
            reason,
            requested_user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventStatusQuery {
    #[serde(default = "default_status")]
    pub status: EventStatusName,
}

fn default_status() -> EventStatusName {
    EventStatusName::Pending
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEventResponse {
    pub event_id: EventId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: EventId,
    pub event_name: String,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub description: String,
    pub max_students: i32,
    pub total_budget: Decimal,
    pub status: EventStatusName,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub registered_count: i64,
    pub remaining_seats: i64,
    pub organizer: EventOrganizer,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let remaining_seats = value.remaining_seats();
        let Event {
            event_id,
            organizer,
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
        Self {
            event_id,
            event_name,
            date_time,
            venue,
            description,
            max_students,
            total_budget,
            status: EventStatusName::from(status),
            rejection_reason,
            created_at,
            registered_count,
            remaining_seats,
            organizer: organizer.into(),
        }
    }
}
