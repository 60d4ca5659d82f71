mod helper;

use axum::http::StatusCode;
use helper::{assert_error, authorized, identity, json_body, request, Mocks};
use kernel::model::{auth::AccessToken, id::UserId, role::Role, user::User};
use shared::error::AppError;
use tower::ServiceExt;

fn alice() -> User {
    User {
        user_id: UserId::new(),
        user_name: "Alice".into(),
        email: "alice@example.com".into(),
        role: Role::Student,
    }
}

#[tokio::test]
async fn signup_creates_user() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .user
        .expect_create()
        .withf(|u| u.email == "alice@example.com" && u.role == Role::Organizer)
        .returning(|u| {
            Ok(User {
                user_id: UserId::new(),
                user_name: u.user_name,
                email: u.email,
                role: u.role,
            })
        });

    let body = serde_json::json!({
        "userName": "Alice",
        "email": "alice@example.com",
        "password": "secret",
        "role": "organizer"
    });
    let res = mocks
        .into_router()
        .oneshot(request("POST", "/api/v1/auth/signup", Some(body)))
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let json = json_body(res).await;
    assert_eq!(json["userName"], "Alice");
    assert_eq!(json["role"], "organizer");
    Ok(())
}

#[tokio::test]
async fn signup_requires_valid_email() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks.user.expect_create().never();

    let body = serde_json::json!({
        "userName": "Alice",
        "email": "not-an-email",
        "password": "secret",
        "role": "student"
    });
    let res = mocks
        .into_router()
        .oneshot(request("POST", "/api/v1/auth/signup", Some(body)))
        .await?;

    assert_error(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn login_issues_access_token() -> anyhow::Result<()> {
    let user = alice();
    let user_id = user.user_id;
    let mut mocks = Mocks::default();
    mocks
        .auth
        .expect_verify_user()
        .withf(|email, password| {
            email.to_string() == "alice@example.com" && password.to_string() == "secret"
        })
        .returning(move |_, _| Ok(user.clone()));
    mocks
        .auth
        .expect_create_token()
        .withf(move |t| t.user_id == user_id && t.role == Role::Student)
        .returning(|_| Ok(AccessToken("signed.jwt.token".into())));

    let body = serde_json::json!({ "email": "alice@example.com", "password": "secret" });
    let res = mocks
        .into_router()
        .oneshot(request("POST", "/api/v1/auth/login", Some(body)))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json["accessToken"], "signed.jwt.token");
    assert_eq!(json["userId"], user_id.to_string());
    assert_eq!(json["role"], "student");
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthenticated() -> anyhow::Result<()> {
    let mut mocks = Mocks::default();
    mocks
        .auth
        .expect_verify_user()
        .returning(|_, _| Err(AppError::UnauthenticatedError));
    mocks.auth.expect_create_token().never();

    let body = serde_json::json!({ "email": "alice@example.com", "password": "wrong" });
    let res = mocks
        .into_router()
        .oneshot(request("POST", "/api/v1/auth/login", Some(body)))
        .await?;

    assert_error(res, StatusCode::UNAUTHORIZED, "AUTHENTICATION_ERROR").await;
    Ok(())
}

#[tokio::test]
async fn current_user_is_returned() -> anyhow::Result<()> {
    let user = alice();
    let caller = identity(Role::Student);
    let mut mocks = Mocks::signed_in_as(caller);
    mocks
        .user
        .expect_find_current_user()
        .withf(move |id| *id == caller.user_id)
        .returning(move |_| Ok(Some(user.clone())));

    let res = mocks
        .into_router()
        .oneshot(authorized("GET", "/api/v1/users/me", None))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["email"], "alice@example.com");
    Ok(())
}

#[tokio::test]
async fn health_checks() -> anyhow::Result<()> {
    let res = Mocks::default()
        .into_router()
        .oneshot(request("GET", "/api/v1/health", None))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let mut mocks = Mocks::default();
    mocks.health.expect_check_db().returning(|| false);
    let res = mocks
        .into_router()
        .oneshot(request("GET", "/api/v1/health/db", None))
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
