//! Unified error handling with Sentry integration.
//!
//! Every route handler returns `Result<T, AppError>`. Client input errors
//! map to 400/404 with a short message; store failures map to 500 with a
//! generic per-operation message while the cause is logged and sent to Sentry.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use contact_book_core::ValidationError;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be understood.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// The store failed; `message` is what the caller sees.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl AppError {
    /// The 404 raised for any id that does not name a stored contact.
    #[must_use]
    pub fn contact_not_found() -> Self {
        Self::NotFound("Contact not found".to_string())
    }

    /// Adapter for `map_err` that attaches the caller-facing message.
    pub fn store(message: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Store { message, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose store details to clients
        let message = match &self {
            Self::Store { message, .. } => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                (*message).to_string()
            }
            Self::Validation(err) => {
                tracing::debug!(error = ?err, "Rejected contact payload");
                self.to_string()
            }
            Self::BadRequest(_) | Self::NotFound(_) => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
