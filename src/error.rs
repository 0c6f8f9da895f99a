use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short reason shown to the caller. Internal details stay in the logs.
    pub fn detail(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e}"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

/// Convenience type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
