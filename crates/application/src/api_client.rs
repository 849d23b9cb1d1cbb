//! The API gateway.
//!
//! Every call to the portal backend goes through `ApiClient`. It resolves
//! the request against the base URL, runs the interceptor chain, sends it
//! through the transport exactly once and classifies the result:
//!
//! - 2xx: the body is decoded into the caller's type
//! - 401: `ApiError::AuthExpired`
//! - other statuses: `ApiError::Server`
//! - no response: `ApiError::Transport`
//!
//! The client never navigates and never mutates the session; reacting to
//! `AuthExpired` is the dispatcher's job.

use std::sync::Arc;
use std::time::Duration;

use medportal_domain::{ApiRequest, ApiResponse, Header, OutgoingRequest};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::interceptor::{BearerAuth, RequestInterceptor};
use crate::ports::HttpTransport;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL that API paths are appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Headers sent with every request.
    pub default_headers: Vec<Header>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![Header::new("Content-Type", "application/json")],
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default timeout and headers.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Single outbound gateway for API calls.
pub struct ApiClient<T> {
    transport: T,
    config: ClientConfig,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client with no interceptors.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            interceptors: Vec::new(),
        }
    }

    /// Creates a client that authenticates with the given session.
    pub fn for_session(transport: T, config: ClientConfig, state: Arc<AppState>) -> Self {
        Self::new(transport, config).with_interceptor(Arc::new(BearerAuth::new(state)))
    }

    /// Appends an interceptor to the chain.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the outgoing request and runs the interceptor chain.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` for unusable paths or bodies and
    /// whatever error an interceptor raises.
    pub fn prepare(&self, request: &ApiRequest) -> Result<OutgoingRequest, ApiError> {
        request.validate()?;

        let raw = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            request.path
        );
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidRequest(format!("{e}: {raw}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        let body = request
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let mut outgoing = OutgoingRequest {
            method: request.method,
            url: url.into(),
            headers: self.config.default_headers.clone(),
            body,
            timeout: self.config.timeout,
        };

        for interceptor in &self.interceptors {
            interceptor.intercept(&mut outgoing)?;
        }

        Ok(outgoing)
    }

    /// Sends the request and returns the successful response body.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error classification.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Vec<u8>, ApiError> {
        let outgoing = self.prepare(request)?;
        let request_id = Uuid::now_v7();
        tracing::debug!(
            %request_id,
            method = %outgoing.method,
            url = %outgoing.url,
            "sending request"
        );

        let response = self.transport.execute(outgoing).await.map_err(|e| {
            tracing::warn!(%request_id, error = %e, "request failed without a response");
            ApiError::Transport(e)
        })?;

        tracing::debug!(%request_id, status = %response.status, "response received");
        classify(response)
    }

    /// Sends the request and decodes the successful response body.
    ///
    /// An empty body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// See the module documentation; decoding failures are `ApiError::Decode`.
    pub async fn send<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let body = self.execute(request).await?;
        decode(&body)
    }
}

fn classify(response: ApiResponse) -> Result<Vec<u8>, ApiError> {
    if response.status.is_success() {
        return Ok(response.body);
    }
    if response.status.is_unauthorized() {
        tracing::warn!("server rejected the session");
        return Err(ApiError::AuthExpired);
    }
    Err(ApiError::Server {
        status: response.status,
        message: response.error_message(),
    })
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, ApiError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
