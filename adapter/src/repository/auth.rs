use crate::database::{model::user::UserCredentialRow, ConnectionPool};
use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kernel::model::{
    auth::{event::CreateToken, AccessIdentity, AccessToken},
    id::UserId,
    role::Role,
    user::User,
};
use kernel::repository::auth::AuthRepository;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

// アクセストークン（JWT）に載せる情報
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: u64,
}

impl AuthRepositoryImpl {
    pub fn new(db: ConnectionPool, secret: &str, ttl: u64) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_identity_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<AccessIdentity> {
        let claims = decode::<Claims>(&access_token.0, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected access token");
                AppError::UnauthenticatedError
            })?;

        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::UnauthenticatedError)?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| AppError::UnauthenticatedError)?;

        Ok(AccessIdentity::new(user_id, role))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserCredentialRow>(
            r#"
                SELECT user_id, name, email, password_hash, role
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::from_store)?
        .ok_or(AppError::UnauthenticatedError)?;

        let (user, password_hash) = row.into_user()?;
        verify_password(password.to_string(), password_hash).await?;

        Ok(user)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: event.user_id.to_string(),
            role: event.role.to_string(),
            iat: now,
            exp: now + self.ttl as i64,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map(AccessToken)
            .map_err(|e| AppError::TokenError(e.to_string()))
    }
}

async fn verify_password(password: String, password_hash: String) -> AppResult<()> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&password_hash)
            .map_err(|e| AppError::PasswordHashError(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::UnauthenticatedError)
    })
    .await
    .map_err(|e| AppError::PasswordHashError(e.to_string()))?
}
