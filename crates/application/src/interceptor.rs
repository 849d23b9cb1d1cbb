//! Request interceptors.
//!
//! Interceptors run in order on every prepared request before it reaches
//! the transport. A failing interceptor aborts the call; nothing is sent.

use std::sync::Arc;

use http::HeaderValue;
use medportal_domain::OutgoingRequest;

use crate::app_state::AppState;
use crate::error::ApiError;

/// A step applied to every outgoing request.
pub trait RequestInterceptor: Send + Sync {
    /// Inspects or rewrites the request.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the call.
    fn intercept(&self, request: &mut OutgoingRequest) -> Result<(), ApiError>;
}

/// Attaches `Authorization: Bearer <token>` when the session has a token.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    state: Arc<AppState>,
}

impl BearerAuth {
    /// Creates the interceptor for the given session.
    #[must_use]
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: &mut OutgoingRequest) -> Result<(), ApiError> {
        let Some(token) = self.state.token() else {
            return Ok(());
        };

        let value = format!("Bearer {token}");
        HeaderValue::from_str(&value).map_err(|e| {
            ApiError::Interceptor(format!("stored token is not a valid header value: {e}"))
        })?;

        request.set_header("Authorization", value);
        Ok(())
    }
}
