use crate::model::report::{EventReport, ReportScope};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn event_report(&self, scope: ReportScope) -> AppResult<EventReport>;
}
