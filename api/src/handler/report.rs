use axum::{extract::State, Json};
use kernel::model::report::ReportScope;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{extractor::AuthorizedUser, model::report::EventReportResponse};

pub async fn show_event_report(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventReportResponse>> {
    user.require_admin()?;

    registry
        .report_repository()
        .event_report(ReportScope::All)
        .await
        .map(EventReportResponse::from)
        .map(Json)
}

pub async fn show_my_event_report(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventReportResponse>> {
    if !user.role().can_organize() {
        return Err(AppError::ForbiddenOperation(
            "レポートを参照できるのは主催者または管理者のみです".into(),
        ));
    }

    registry
        .report_repository()
        .event_report(ReportScope::Organizer(user.id()))
        .await
        .map(EventReportResponse::from)
        .map(Json)
}
