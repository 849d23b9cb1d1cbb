//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A navigation target is not an absolute path.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// A request path is not an absolute path.
    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
