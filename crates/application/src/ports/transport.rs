//! HTTP transport port

use std::future::Future;

use medportal_domain::{ApiResponse, OutgoingRequest};

/// Network-level failures: no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending prepared requests.
///
/// Implementations send each request once and return whatever response
/// arrives, including error statuses. Only failures without a response are
/// reported as `TransportError`.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    fn execute(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
