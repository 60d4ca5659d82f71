use crate::model::{
    auth::{event::CreateToken, AccessIdentity, AccessToken},
    user::User,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(feature = "test", mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    // アクセストークンを検証し、呼び出し元のユーザー ID とロールを返す
    async fn fetch_identity_from_token(&self, access_token: &AccessToken)
        -> AppResult<AccessIdentity>;
    // メールアドレスとパスワードを照合する
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<User>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
}
