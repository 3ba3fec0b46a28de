//! Unified error types for the AnonMask core engine
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic / record store errors
//! - `BackendError`: Hosted backend HTTP client errors
//! - `JudgeError`: AI judge transport and response errors
//! - `AppError`: Application layer errors (wraps the others)

use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Hosted backend client errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// AI judge errors
///
/// `Unavailable` and `Timeout` mean no verdict was obtained and the call may
/// be retried. `Malformed` means a response arrived but did not match the
/// requested schema.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("AI judge unavailable: {0}")]
    Unavailable(String),

    #[error("AI judge timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Malformed judge response: {0}")]
    Malformed(String),
}

impl From<BackendError> for DomainError {
    fn from(e: BackendError) -> Self {
        DomainError::Store(e.to_string())
    }
}

impl From<BackendError> for JudgeError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Deserialization(msg) => JudgeError::Malformed(msg),
            other => JudgeError::Unavailable(other.to_string()),
        }
    }
}

/// Application layer errors - returned by the services in `app`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("AI judge error: {0}")]
    Judge(#[from] JudgeError),

    /// The judge answered but broke the selection contract (schema-invalid
    /// object or out-of-range candidate index). Never coerced to a default.
    #[error("Judge protocol violation: {0}")]
    Protocol(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Whether the caller may retry the operation and expect a different
    /// outcome. Protocol violations and validation failures are not
    /// retryable; transport-level failures are.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Judge(JudgeError::Malformed(_)) => false,
            AppError::Judge(_) => true,
            AppError::Domain(DomainError::Store(_)) => true,
            _ => false,
        }
    }
}
