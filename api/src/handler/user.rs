use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{extractor::AuthorizedUser, model::user::UserResponse};

#[tracing::instrument(skip(user, registry), fields(user_id = %user.id()))]
pub async fn get_current_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_repository()
        .find_current_user(user.id())
        .await
        .and_then(|u| match u {
            Some(u) => Ok(Json(u.into())),
            None => Err(AppError::EntityNotFound(
                "ログイン中のユーザーが見つかりませんでした".into(),
            )),
        })
}
