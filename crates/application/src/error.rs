//! Application error types

use medportal_domain::{DomainError, StatusCode};
use thiserror::Error;

use crate::ports::{StorageError, TransportError};
use crate::router::NavigationError;

/// Errors returned by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401; the session is no longer valid.
    #[error("session expired")]
    AuthExpired,

    /// No response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status other than 401.
    #[error("server error {status}: {message}")]
    Server {
        /// Response status.
        status: StatusCode,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A request interceptor refused the request; nothing was sent.
    #[error("request interceptor failed: {0}")]
    Interceptor(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing the session failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Returns true for the 401 case.
    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Returns the HTTP status if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::AuthExpired => Some(StatusCode::UNAUTHORIZED),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

/// Application-level errors for flows spanning several components.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A navigation failed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The session could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
