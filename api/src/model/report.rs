use kernel::model::{
    id::EventId,
    report::{EventReport, MonthlyEventCount, RegistrationStat, StatusCount},
};
use serde::Serialize;

use super::event::EventStatusName;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReportResponse {
    pub status_counts: Vec<StatusCountResponse>,
    pub monthly_events: Vec<MonthlyEventCountResponse>,
    pub registration_stats: Vec<RegistrationStatResponse>,
}

impl From<EventReport> for EventReportResponse {
    fn from(value: EventReport) -> Self {
        let EventReport {
            status_counts,
            monthly_events,
            registration_stats,
        } = value;
        Self {
            status_counts: status_counts.into_iter().map(Into::into).collect(),
            monthly_events: monthly_events.into_iter().map(Into::into).collect(),
            registration_stats: registration_stats.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountResponse {
    pub status: EventStatusName,
    pub count: i64,
}

impl From<StatusCount> for StatusCountResponse {
    fn from(value: StatusCount) -> Self {
        Self {
            status: EventStatusName::from(value.status),
            count: value.count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEventCountResponse {
    pub month: String,
    pub event_count: i64,
}

impl From<MonthlyEventCount> for MonthlyEventCountResponse {
    fn from(value: MonthlyEventCount) -> Self {
        let MonthlyEventCount { month, event_count } = value;
        Self { month, event_count }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatResponse {
    pub event_id: EventId,
    pub event_name: String,
    pub max_students: i32,
    pub registered_count: i64,
    pub fill_percentage: i64,
}

impl From<RegistrationStat> for RegistrationStatResponse {
    fn from(value: RegistrationStat) -> Self {
        let RegistrationStat {
            event_id,
            event_name,
            max_students,
            registered_count,
            fill_percentage,
        } = value;
        Self {
            event_id,
            event_name,
            max_students,
            registered_count,
            fill_percentage,
        }
    }
}
