use super::parse_column;
use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::{AppError, AppResult};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> AppResult<Self> {
        let UserRow {
            user_id,
            name,
            email,
            role,
        } = value;
        Ok(User {
            user_id,
            user_name: name,
            email,
            role: parse_column::<Role>("users.role", &role)?,
        })
    }
}

// ログイン時の照合に使う型
#[derive(sqlx::FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl UserCredentialRow {
    pub fn into_user(self) -> AppResult<(User, String)> {
        let UserCredentialRow {
            user_id,
            name,
            email,
            password_hash,
            role,
        } = self;
        let user = User::try_from(UserRow {
            user_id,
            name,
            email,
            role,
        })?;
        Ok((user, password_hash))
    }
}
