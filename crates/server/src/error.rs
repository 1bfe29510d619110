//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that renders every failure as a JSON
//! body. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the fixture server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store precondition failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No route matches the request path.
    #[error("Not found")]
    RouteNotFound,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) => err.status(),
            Self::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }

    /// JSON body for this error.
    ///
    /// Auth failures use `description`/`error` fields; everything else
    /// carries a `message`.
    fn body(&self) -> Value {
        match self {
            Self::Store(StoreError::AuthRequired) => json!({
                "description": self.to_string(),
                "error": "Authorization Required",
                "status_code": 401,
            }),
            Self::Store(StoreError::InvalidCredentials) => json!({
                "description": self.to_string(),
                "error": "Bad Request",
            }),
            Self::Store(StoreError::UnknownLogin) => json!({
                "description": self.to_string(),
                "error": "Bad Request",
                "status_code": 401,
            }),
            Self::Store(StoreError::UsernameTaken { existing }) => json!({
                "message": self.to_string(),
                "uuid": existing,
            }),
            // Don't expose internal error details to clients
            Self::Store(StoreError::LockPoisoned) => json!({
                "message": "Internal server error",
            }),
            Self::Store(_) | Self::RouteNotFound => json!({ "message": self.to_string() }),
        }
    }

    const fn is_internal(&self) -> bool {
        matches!(self, Self::Store(StoreError::LockPoisoned))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_internal() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if let Self::Store(err) = &self {
            tracing::debug!(
                error = %err,
                conflict = err.is_conflict(),
                status = err.status().as_u16(),
                "Request rejected"
            );
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
