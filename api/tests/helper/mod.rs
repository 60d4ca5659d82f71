#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use kernel::model::{
    auth::AccessIdentity,
    event::{Event, EventStatus},
    id::{EventId, UserId},
    role::Role,
    user::EventOrganizer,
};
use kernel::repository::{
    auth::MockAuthRepository, event::MockEventRepository, expense::MockExpenseRepository,
    health::MockHealthCheckRepository, registration::MockRegistrationRepository,
    report::MockReportRepository, user::MockUserRepository,
};
use registry::AppRegistry;
use rust_decimal::Decimal;
use serde_json::Value;

pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct Mocks {
    pub health: MockHealthCheckRepository,
    pub user: MockUserRepository,
    pub auth: MockAuthRepository,
    pub event: MockEventRepository,
    pub registration: MockRegistrationRepository,
    pub expense: MockExpenseRepository,
    pub report: MockReportRepository,
}

impl Mocks {
    // TOKEN を提示したリクエストを identity として認証する
    pub fn signed_in_as(identity: AccessIdentity) -> Self {
        let mut mocks = Self::default();
        mocks
            .auth
            .expect_fetch_identity_from_token()
            .returning(move |token| {
                if token.0 == TOKEN {
                    Ok(identity)
                } else {
                    Err(shared::error::AppError::UnauthenticatedError)
                }
            });
        mocks
    }

    pub fn into_router(self) -> Router {
        let registry = AppRegistry::new(
            Arc::new(self.health),
            Arc::new(self.user),
            Arc::new(self.auth),
            Arc::new(self.event),
            Arc::new(self.registration),
            Arc::new(self.expense),
            Arc::new(self.report),
        );
        api::route::v1::routes().with_state(registry)
    }
}

pub fn identity(role: Role) -> AccessIdentity {
    AccessIdentity::new(UserId::new(), role)
}

pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    build(method, uri, None, body)
}

pub fn authorized(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    build(method, uri, Some(TOKEN), body)
}

fn build(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_error(res: Response, status: StatusCode, kind: &str) -> Value {
    assert_eq!(res.status(), status);
    let body = json_body(res).await;
    assert_eq!(body["error"]["kind"], kind);
    body
}

pub fn sample_event(organizer_id: UserId, status: EventStatus) -> Event {
    Event {
        event_id: EventId::new(),
        organizer: EventOrganizer {
            organizer_id,
            organizer_name: "Organizer".into(),
            organizer_email: "organizer@example.com".into(),
        },
        event_name: "Hackathon".into(),
        date_time: Utc::now() + Duration::days(7),
        venue: "Main Hall".into(),
        description: String::new(),
        max_students: 2,
        total_budget: Decimal::from(100),
        status,
        rejection_reason: None,
        created_at: Utc::now(),
        registered_count: 1,
    }
}
