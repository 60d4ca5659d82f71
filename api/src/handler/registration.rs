use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use kernel::model::{
    id::EventId,
    registration::event::{CancelRegistration, CreateRegistration},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::registration::{RegistrationResponse, RegistrationsResponse},
};

#[tracing::instrument(skip(user, registry), fields(user_id = %user.id()))]
pub async fn register_for_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    let registration = registry
        .registration_repository()
        .create(CreateRegistration::new(user.id(), event_id))
        .await?;

    Ok((StatusCode::CREATED, Json(registration.into())))
}

#[tracing::instrument(skip(user, registry), fields(user_id = %user.id()))]
pub async fn cancel_registration(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .registration_repository()
        .cancel(CancelRegistration::new(user.id(), event_id))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_my_registrations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationsResponse>> {
    registry
        .registration_repository()
        .find_by_user_id(user.id())
        .await
        .map(RegistrationsResponse::from)
        .map(Json)
}

// 参加者一覧はイベントの主催者本人または管理者のみ参照できる
pub async fn show_event_registrations(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationsResponse>> {
    let event = registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("イベント（{event_id}）が見つかりませんでした。"))
        })?;
    if !user.identity().can_manage(event.organizer_id()) {
        return Err(AppError::ForbiddenOperation(
            "参加者一覧を参照できるのは主催者本人または管理者のみです".into(),
        ));
    }

    registry
        .registration_repository()
        .find_by_event_id(event_id)
        .await
        .map(RegistrationsResponse::from)
        .map(Json)
}
