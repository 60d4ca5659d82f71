use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    InvalidRequest(#[from] garde::Report),
    #[error("認証に失敗しました。")]
    UnauthenticatedError,
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    DuplicateEvent(String),
    #[error("{0}")]
    CapacityExceeded(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("データベースが一時的に利用できません。時間をおいて再試行してください。")]
    StoreUnavailable(#[source] sqlx::Error),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("パスワードのハッシュ処理に失敗しました: {0}")]
    PasswordHashError(String),
    #[error("アクセストークンを発行できませんでした: {0}")]
    TokenError(String),
}

impl AppError {
    // クエリ実行時の sqlx エラーを分類する。
    // タイムアウトや接続断、ロック競合は再試行可能なものとして扱う
    pub fn from_store(err: sqlx::Error) -> Self {
        if is_transient(&err) {
            Self::StoreUnavailable(err)
        } else {
            Self::SpecificOperationError(err)
        }
    }

    // begin / commit 時の sqlx エラーを分類する
    pub fn from_transaction(err: sqlx::Error) -> Self {
        if is_transient(&err) {
            Self::StoreUnavailable(err)
        } else {
            Self::TransactionError(err)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            Self::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            Self::EntityNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateEvent(_) | Self::CapacityExceeded(_) | Self::InvalidState(_) => {
                StatusCode::CONFLICT
            }
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::TransactionError(_)
            | Self::SpecificOperationError(_)
            | Self::NoRowsAffectedError(_)
            | Self::ConversionEntityError(_)
            | Self::PasswordHashError(_)
            | Self::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // クライアントが機械的に判別するためのエラー種別
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError(_) | Self::InvalidRequest(_) => "VALIDATION_ERROR",
            Self::UnauthenticatedError => "AUTHENTICATION_ERROR",
            Self::ForbiddenOperation(_) => "PERMISSION_ERROR",
            Self::EntityNotFound(_) => "NOT_FOUND",
            Self::DuplicateEvent(_) => "DUPLICATE_EVENT",
            Self::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::TransactionError(_)
            | Self::SpecificOperationError(_)
            | Self::NoRowsAffectedError(_)
            | Self::ConversionEntityError(_)
            | Self::PasswordHashError(_)
            | Self::TokenError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        // 40001: serialization_failure, 40P01: deadlock_detected,
        // 55P03: lock_not_available, 57014: query_canceled (statement_timeout)
        sqlx::Error::Database(db) => matches!(
            db.code().as_deref(),
            Some("40001" | "40P01" | "55P03" | "57014")
        ),
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let kind = self.kind();

        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                error.kind = kind,
                "Unexpected error happened"
            );
        } else {
            tracing::debug!(error.message = %self, error.kind = kind, "Request rejected");
        }

        let body = Json(json!({
            "error": {
                "kind": kind,
                "message": self.to_string(),
                "retryable": self.is_retryable(),
            }
        }));

        (status_code, body).into_response()
    }
}

// 抽出に失敗したリクエストも他の入力エラーと同じ形式で返す
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
