//! MedPortal Application - Session, gateway and navigation
//!
//! This crate holds the ports the client core depends on and the stateful
//! pieces built on them: the session store, the shared `AppState`, the API
//! gateway with its interceptors, the router and the `Portal` dispatcher.

pub mod api;
pub mod api_client;
pub mod app_state;
pub mod error;
pub mod interceptor;
pub mod portal;
pub mod ports;
pub mod router;
pub mod session_store;

#[cfg(test)]
mod test_support;

pub use api_client::{ApiClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use app_state::AppState;
pub use error::{ApiError, ApplicationError, ApplicationResult};
pub use interceptor::{BearerAuth, RequestInterceptor};
pub use portal::Portal;
pub use ports::{HttpTransport, KeyValueStorage, StorageError, TransportError};
pub use router::{MAX_REDIRECTS, Navigation, NavigationError, Router};
pub use session_store::{SessionStore, TOKEN_KEY, USER_KEY};
