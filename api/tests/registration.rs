mod helper;

use axum::http::StatusCode;
use chrono::Utc;
use helper::{assert_error, authorized, identity, json_body, sample_event, Mocks};
use kernel::model::{
    event::EventStatus,
    id::{EventId, RegistrationId},
    registration::{ensure_seat_available, Registration, RegistrationStatus},
    role::Role,
};
use shared::error::AppError;
use tower::ServiceExt;

#[tokio::test]
async fn registration_returns_snapshot() -> anyhow::Result<()> {
    let student = identity(Role::Student);
    let event_id = EventId::new();
    let mut mocks = Mocks::signed_in_as(student);
    mocks
        .registration
        .expect_create()
        .withf(move |r| r.user_id == student.user_id && r.event_id == event_id)
        .returning(|r| {
            Ok(Registration {
                registration_id: RegistrationId::new(),
                user_id: r.user_id,
                event_id: r.event_id,
                student_name: "Alice".into(),
                email_id: "alice@example.com".into(),
                event_name: "Hackathon".into(),
                status: RegistrationStatus::Registered,
                registered_at: Utc::now(),
            })
        });

    let uri = format!("/api/v1/events/{event_id}/registrations");
    let res = mocks.into_router().oneshot(authorized("POST", &uri, None)).await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let json = json_body(res).await;
    assert_eq!(json["studentName"], "Alice");
    assert_eq!(json["emailId"], "alice@example.com");
    assert_eq!(json["eventName"], "Hackathon");
    assert_eq!(json["status"], "Registered");
    Ok(())
}

#[tokio::test]
async fn full_event_maps_to_capacity_exceeded() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Student));
    mocks.registration.expect_create().returning(|_| {
        ensure_seat_available(2, 2)?;
        unreachable!()
    });

    let uri = format!("/api/v1/events/{}/registrations", EventId::new());
    let res = mocks.into_router().oneshot(authorized("POST", &uri, None)).await?;

    let json = assert_error(res, StatusCode::CONFLICT, "CAPACITY_EXCEEDED").await;
    assert_eq!(json["error"]["retryable"], false);
    Ok(())
}

#[tokio::test]
async fn store_timeout_is_retryable() -> anyhow::Result<()> {
    let mut mocks = Mocks::signed_in_as(identity(Role::Student));
    mocks
        .registration
        .expect_create()
        .returning(|_| Err(AppError::from_store(sqlx::Error::PoolTimedOut)));

    let uri = format!("/api/v1/events/{}/registrations", EventId::new());
    let res = mocks.into_router().oneshot(authorized("POST", &uri, None)).await?;

    let json = assert_error(res, StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE").await;
    assert_eq!(json["error"]["retryable"], true);
    Ok(())
}

#[tokio::test]
async fn cancelling_succeeds_for_the_caller() -> anyhow::Result<()> {
    let student = identity(Role::Student);
    let event_id = EventId::new();
    let mut mocks = Mocks::signed_in_as(student);
    mocks
        .registration
        .expect_cancel()
        .withf(move |c| c.user_id == student.user_id && c.event_id == event_id)
        .times(2)
        .returning(|_| Ok(()));

    let app = mocks.into_router();
    let uri = format!("/api/v1/events/{event_id}/registrations");
    for _ in 0..2 {
        let res = app
            .clone()
            .oneshot(authorized("DELETE", &uri, None))
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    Ok(())
}

#[tokio::test]
async fn participant_list_requires_ownership() -> anyhow::Result<()> {
    let organizer = identity(Role::Organizer);
    let event = sample_event(organizer.user_id, EventStatus::Approved);
    let event_id = event.event_id;

    let mut mocks = Mocks::signed_in_as(identity(Role::Organizer));
    let other = event.clone();
    mocks
        .event
        .expect_find_by_id()
        .returning(move |_| Ok(Some(other.clone())));
    mocks.registration.expect_find_by_event_id().never();
    let uri = format!("/api/v1/events/{event_id}/registrations");
    let res = mocks.into_router().oneshot(authorized("GET", &uri, None)).await?;
    assert_error(res, StatusCode::FORBIDDEN, "PERMISSION_ERROR").await;

    let mut mocks = Mocks::signed_in_as(organizer);
    mocks
        .event
        .expect_find_by_id()
        .returning(move |_| Ok(Some(event.clone())));
    mocks
        .registration
        .expect_find_by_event_id()
        .returning(|_| Ok(vec![]));
    let res = mocks.into_router().oneshot(authorized("GET", &uri, None)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
