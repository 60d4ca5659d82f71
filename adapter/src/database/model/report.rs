use super::parse_column;
use kernel::model::{
    id::EventId,
    report::{MonthlyEventCount, RegistrationStat, StatusCount},
};
use shared::error::{AppError, AppResult};

#[derive(sqlx::FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}

impl TryFrom<StatusCountRow> for StatusCount {
    type Error = AppError;

    fn try_from(value: StatusCountRow) -> AppResult<Self> {
        Ok(StatusCount {
            status: parse_column("events.status", &value.status)?,
            count: value.count,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct MonthlyEventCountRow {
    pub month: String,
    pub event_count: i64,
}

impl From<MonthlyEventCountRow> for MonthlyEventCount {
    fn from(value: MonthlyEventCountRow) -> Self {
        MonthlyEventCount {
            month: value.month,
            event_count: value.event_count,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct RegistrationStatRow {
    pub event_id: EventId,
    pub event_name: String,
    pub max_students: i32,
    pub registered_count: i64,
    pub fill_percentage: i64,
}

impl From<RegistrationStatRow> for RegistrationStat {
    fn from(value: RegistrationStatRow) -> Self {
        let RegistrationStatRow {
            event_id,
            event_name,
            max_students,
            registered_count,
            fill_percentage,
        } = value;
        RegistrationStat {
            event_id,
            event_name,
            max_students,
            registered_count,
            fill_percentage,
        }
    }
}
