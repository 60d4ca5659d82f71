use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::{
    event::{event::DeleteEvent, EventStatus},
    id::EventId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::event::{
        CreateEventRequest, CreateEventRequestWithOrganizer, CreatedEventResponse,
        EventResponse, EventStatusQuery, EventsResponse, UpdateEventRequest,
        UpdateEventRequestWithIds, UpdateEventStatusRequest, UpdateEventStatusRequestWithIds,
    },
};

#[tracing::instrument(skip(user, registry, req), fields(user_id = %user.id()))]
pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateEventRequest>, AppError>,
) -> AppResult<(StatusCode, Json<CreatedEventResponse>)> {
    req.validate()?;

    let create_event = CreateEventRequestWithOrganizer::new(user.identity(), req);
    let event_id = registry.event_repository().create(create_event.into()).await?;

    Ok((StatusCode::CREATED, Json(CreatedEventResponse { event_id })))
}

pub async fn show_event_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_pending_event_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    user.require_admin()?;

    registry
        .event_repository()
        .find_pending()
        .await
        .map(EventsResponse::from)
        .map(Json)
}

// 学生向けの公開一覧のため認証は不要
pub async fn show_approved_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_approved_upcoming()
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_my_event_list(
    user: AuthorizedUser,
    WithRejection(Query(query), _): WithRejection<Query<EventStatusQuery>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_by_organizer(user.id(), EventStatus::from(query.status))
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_event(
    _user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|e| match e {
            Some(e) => Ok(Json(e.into())),
            None => Err(AppError::EntityNotFound(format!(
                "イベント（{event_id}）が見つかりませんでした。"
            ))),
        })
}

#[tracing::instrument(skip(user, registry, req), fields(user_id = %user.id()))]
pub async fn update_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateEventRequest>, AppError>,
) -> AppResult<StatusCode> {
    req.validate()?;

    let update_event = UpdateEventRequestWithIds::new(event_id, user.identity(), req);
    registry
        .event_repository()
        .update(update_event.into())
        .await
        .map(|_| StatusCode::OK)
}

#[tracing::instrument(skip(user, registry, req), fields(user_id = %user.id()))]
pub async fn update_event_status(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateEventStatusRequest>, AppError>,
) -> AppResult<StatusCode> {
    let transition = UpdateEventStatusRequestWithIds::new(event_id, user.identity(), req);
    registry
        .event_repository()
        .transition_status(transition.into())
        .await
        .map(|_| StatusCode::OK)
}

#[tracing::instrument(skip(user, registry), fields(user_id = %user.id()))]
pub async fn delete_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_event = DeleteEvent {
        event_id,
        requested_user: user.identity(),
    };
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| StatusCode::OK)
}
