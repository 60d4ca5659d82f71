use garde::Validate;
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use serde::{Deserialize, Serialize};

use super::user::RoleName;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub user_id: UserId,
    pub user_name: String,
    pub role: RoleName,
}

impl AccessTokenResponse {
    pub fn new(access_token: AccessToken, user: User) -> Self {
        Self {
            access_token: access_token.0,
            user_id: user.user_id,
            user_name: user.user_name,
            role: RoleName::from(user.role),
        }
    }
}
