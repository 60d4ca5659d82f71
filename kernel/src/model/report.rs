use crate::model::{
    event::EventStatus,
    id::{EventId, UserId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    All,
    Organizer(UserId),
}

impl ReportScope {
    pub fn organizer_id(self) -> Option<UserId> {
        match self {
            ReportScope::All => None,
            ReportScope::Organizer(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusCount {
    pub status: EventStatus,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct MonthlyEventCount {
    // YYYY-MM
    pub month: String,
    pub event_count: i64,
}

#[derive(Debug, Clone)]
pub struct RegistrationStat {
    pub event_id: EventId,
    pub event_name: String,
    pub max_students: i32,
    pub registered_count: i64,
    pub fill_percentage: i64,
}

#[derive(Debug, Clone)]
pub struct EventReport {
    pub status_counts: Vec<StatusCount>,
    pub monthly_events: Vec<MonthlyEventCount>,
    pub registration_stats: Vec<RegistrationStat>,
}
