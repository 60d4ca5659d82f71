mod helper;

use axum::http::StatusCode;
use helper::{assert_error, authorized, identity, json_body, request, sample_event, Mocks};
use kernel::model::{event::EventStatus, id::EventId, role::Role};
use shared::error::AppError;
use tower::ServiceExt;

#[tokio::test]
async fn create_event_returns_created_with_id() -> anyhow::Result<()> {
    let organizer = identity(Role::Organizer);
    let event_id = EventId::new();
    let mut mocks = Mocks::signed_in_as(organizer);
    mocks
        .event
        .expect_create()
        .withf(move |e| {
            e.organizer == organizer && e.event_name == "Hackathon" && e.max_students == 2
        })
        .times(1)
        .returning(move |_| Ok(event_id));

    let body = serde_json::json!({
        "eventName": "Hackathon",
        "dateTime": "2030-04-01T10:00:00Z",
        "venue": "Main Hall",
        "description": "Annual meetup",
        "maxStudents": 2,
        "totalBudget": 100
    });
    let res = mocks
        .into_router()
        .oneshot(authorized("POST", "/api/v1/events", Some(body)))
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let json = json_body(res).await;
    assert_eq!(json["eventId"], event_id.to_string());
    Ok(())
}

#[tokio::test]
async fn blank_event_name_is_rejected_before_reaching_the_store() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks.event.expect_create().never();

    let body = serde_json::json!({
        "eventName": "",
        "dateTime": "2030-04-01T10:00:00Z",
        "venue": "Main Hall",
        "maxStudents": 0,
        "totalBudget": 100
    });
    let res = mocks
        .into_router()
        .oneshot(authorized("POST", "/api/v1/events", Some(body)))
        .await?;

    assert_error(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn body_missing_a_required_field_is_a_validation_error() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks.event.expect_create().never();

    let body = serde_json::json!({
        "eventName": "Hackathon",
        "dateTime": "2030-04-01T10:00:00Z",
        "maxStudents": 2,
        "totalBudget": 100
    });
    let res = mocks
        .into_router()
        .oneshot(authorized("POST", "/api/v1/events", Some(body)))
        .await?;

    let json = assert_error(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    assert!(json["error"]["message"].as_str().unwrap().contains("venue"));
    assert_eq!(json["error"]["retryable"], false);
    Ok(())
}

#[tokio::test]
async fn malformed_path_and_query_are_validation_errors() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks.event.expect_find_by_id().never();
    mocks.event.expect_find_by_organizer().never();
    let app = mocks.into_router();

    let res = app
        .clone()
        .oneshot(authorized("GET", "/api/v1/events/not-a-uuid", None))
        .await?;
    assert_error(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let res = app
        .oneshot(authorized("GET", "/api/v1/events/mine?status=bogus", None))
        .await?;
    assert_error(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn duplicate_submission_maps_to_conflict() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks
        .event
        .expect_create()
        .returning(|_| Err(AppError::DuplicateEvent("Hackathon".into())));

    let body = serde_json::json!({
        "eventName": "Hackathon",
        "dateTime": "2030-04-01T10:00:00Z",
        "venue": "Main Hall",
        "maxStudents": 2,
        "totalBudget": 100
    });
    let res = mocks
        .into_router()
        .oneshot(authorized("POST", "/api/v1/events", Some(body)))
        .await?;

    let json = assert_error(res, StatusCode::CONFLICT, "DUPLICATE_EVENT").await;
    assert_eq!(json["error"]["retryable"], false);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthenticated() -> anyhow::Result<()> {
    let res = Mocks::default()
        .into_router()
        .oneshot(request("GET", "/api/v1/events", None))
        .await?;

    assert_error(res, StatusCode::UNAUTHORIZED, "AUTHENTICATION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn pending_list_is_admin_only() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks.event.expect_find_pending().never();
    let res = mocks
        .into_router()
        .oneshot(authorized("GET", "/api/v1/events/pending", None))
        .await?;
    assert_error(res, StatusCode::FORBIDDEN, "PERMISSION_ERROR").await;

    let admin = identity(Role::Admin);
    let mut mocks = Mocks::signed_in_as(admin);
    let organizer_id = identity(Role::Organizer).user_id;
    mocks
        .event
        .expect_find_pending()
        .returning(move || Ok(vec![sample_event(organizer_id, EventStatus::Pending)]));
    let res = mocks
        .into_router()
        .oneshot(authorized("GET", "/api/v1/events/pending", None))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["items"][0]["status"], "pending");
    assert_eq!(
        json["items"][0]["organizer"]["organizerEmail"],
        "organizer@example.com"
    );
    Ok(())
}

#[tokio::test]
async fn approved_list_is_public() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    let organizer_id = identity(Role::Organizer).user_id;
    mocks
        .event
        .expect_find_approved_upcoming()
        .returning(move || Ok(vec![sample_event(organizer_id, EventStatus::Approved)]));

    let res = mocks
        .into_router()
        .oneshot(request("GET", "/api/v1/events/approved", None))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["items"][0]["eventName"], "Hackathon");
    assert_eq!(json["items"][0]["registeredCount"], 1);
    assert_eq!(json["items"][0]["remainingSeats"], 1);
    Ok(())
}

#[tokio::test]
async fn my_events_are_filtered_by_status() -> anyhow::Result<()> {
    let organizer = identity(Role::Organizer);
    let mut mocks = Mocks::signed_in_as(organizer);
    mocks
        .event
        .expect_find_by_organizer()
        .withf(move |id, status| *id == organizer.user_id && *status == EventStatus::Rejected)
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let res = mocks
        .into_router()
        .oneshot(authorized("GET", "/api/v1/events/mine?status=rejected", None))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["items"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn unknown_event_is_not_found() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Student));
    mocks.event.expect_find_by_id().returning(|_| Ok(None));

    let uri = format!("/api/v1/events/{}", EventId::new());
    let res = mocks.into_router().oneshot(authorized("GET", &uri, None)).await?;

    assert_error(res, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    Ok(())
}

#[tokio::test]
async fn updating_an_approved_event_is_an_invalid_state() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks.event.expect_update().returning(|_| {
        EventStatus::Approved.ensure_editable()?;
        Ok(())
    });

    let uri = format!("/api/v1/events/{}", EventId::new());
    let body = serde_json::json!({ "venue": "Room 101" });
    let res = mocks
        .into_router()
        .oneshot(authorized("PUT", &uri, Some(body)))
        .await?;

    assert_error(res, StatusCode::CONFLICT, "INVALID_STATE").await;
    Ok(())
}

#[tokio::test]
async fn rejecting_without_reason_is_a_validation_error() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Admin));
    mocks
        .event
        .expect_transition_status()
        .returning(|e| {
            e.validate()?;
            Ok(())
        });

    let uri = format!("/api/v1/events/{}/status", EventId::new());
    let body = serde_json::json!({ "status": "rejected", "reason": "   " });
    let res = mocks
        .into_router()
        .oneshot(authorized("PUT", &uri, Some(body)))
        .await?;

    assert_error(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn organizers_cannot_approve_events() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks
        .event
        .expect_transition_status()
        .returning(|e| {
            e.validate()?;
            Ok(())
        });

    let uri = format!("/api/v1/events/{}/status", EventId::new());
    let body = serde_json::json!({ "status": "approved" });
    let res = mocks
        .into_router()
        .oneshot(authorized("PUT", &uri, Some(body)))
        .await?;

    assert_error(res, StatusCode::FORBIDDEN, "PERMISSION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn global_report_is_admin_only() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    mocks.report.expect_event_report().never();

    let res = mocks
        .into_router()
        .oneshot(authorized("GET", "/api/v1/events/reports", None))
        .await?;

    assert_error(res, StatusCode::FORBIDDEN, "PERMISSION_ERROR").await;
    Ok(())
}
