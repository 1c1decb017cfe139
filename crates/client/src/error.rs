//! Client error types.

use thiserror::Error;

/// Errors returned by [`crate::ContactApi`] implementations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL (or a path joined onto it) is invalid.
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, if any.
        message: String,
    },
}

impl ClientError {
    /// Whether the API reported that the contact does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
