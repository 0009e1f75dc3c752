//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Integrity`] → 422
/// - [`ServiceError::Configuration`] → 500
/// - [`ServiceError::Unavailable`] → 503
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed or asked for something that does not exist.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A stored encrypted record failed authentication: tampered data or a
    /// record written under a different key.
    #[error("integrity check failed: {0}")]
    Integrity(String),

    /// Key material is absent or invalid. Needs operator intervention.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The payment key has not been loaded yet.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Integrity(_) => 422,
            ServiceError::Configuration(_) => 500,
            ServiceError::Unavailable(_) => 503,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code placed in the `code` field of an
    /// [`ErrorResponse`](crate::protocol::ErrorResponse).
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Integrity(_) => "integrity_error",
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::Unavailable(_) => "service_unavailable",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}
