use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{
    auth::{AccessIdentity, AccessToken},
    id::UserId,
    role::Role,
};
use registry::AppRegistry;
use shared::error::AppError;

// リクエストの Authorization ヘッダーを検証済みの呼び出し元に変換する
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub identity: AccessIdentity,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn is_admin(&self) -> bool {
        self.identity.is_admin()
    }

    pub fn identity(&self) -> AccessIdentity {
        self.identity
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation(
                "この操作は管理者のみ実行できます".into(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthenticatedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let identity = registry
            .auth_repository()
            .fetch_identity_from_token(&access_token)
            .await?;

        Ok(Self {
            access_token,
            identity,
        })
    }
}
