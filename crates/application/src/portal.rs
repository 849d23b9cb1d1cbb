//! The portal dispatcher.
//!
//! `Portal` wires the session, the API gateway and the router together and
//! owns the reaction to a rejected session: when any call comes back
//! `AuthExpired` it signs out, sends the router to the login page with a
//! `redirect` back to where the user was, and raises a notice.

use std::sync::Arc;

use medportal_domain::{
    ApiRequest, LANDING_PATH, LOGIN_PATH, Location, Notice, NoticeKind, REDIRECT_PARAM,
    RouteTable, login_redirect,
};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;

use crate::api::{self, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::api_client::{ApiClient, ClientConfig};
use crate::app_state::AppState;
use crate::error::{ApiError, ApplicationResult};
use crate::ports::HttpTransport;
use crate::router::{Navigation, NavigationError, Router};

/// Session, gateway and router behind one handle.
pub struct Portal<T> {
    state: Arc<AppState>,
    client: ApiClient<T>,
    router: Mutex<Router>,
    notices: Mutex<Vec<Notice>>,
}

impl<T: HttpTransport> Portal<T> {
    /// Creates a portal whose gateway authenticates with `state`.
    pub fn new(state: Arc<AppState>, transport: T, config: ClientConfig, table: RouteTable) -> Self {
        let client = ApiClient::for_session(transport, config, Arc::clone(&state));
        Self {
            state,
            client,
            router: Mutex::new(Router::new(table)),
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Returns the shared session state.
    pub const fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Returns the current location, if any navigation happened.
    pub fn current_location(&self) -> Option<Location> {
        self.router.lock().current().cloned()
    }

    /// Returns the navigation history, oldest first.
    pub fn history(&self) -> Vec<Location> {
        self.router.lock().history().to_vec()
    }

    /// Navigates to `target`, guarded by the current session.
    ///
    /// # Errors
    ///
    /// Returns a `NavigationError` if the target cannot be resolved.
    pub fn navigate(&self, target: Location) -> Result<Navigation, NavigationError> {
        let authenticated = self.state.is_authenticated();
        self.router.lock().push(target, authenticated)
    }

    /// Sends a request and decodes its body.
    ///
    /// A 401 signs the user out before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the gateway's `ApiError`.
    pub async fn send<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        match self.client.send(request).await {
            Err(ApiError::AuthExpired) => {
                self.handle_auth_expired().await;
                Err(ApiError::AuthExpired)
            }
            other => other,
        }
    }

    async fn handle_auth_expired(&self) {
        if let Err(e) = self.state.logout().await {
            tracing::error!(error = %e, "failed to clear the stored session");
        }

        // Lock scope ends before anything else is awaited.
        {
            let mut router = self.router.lock();
            let target = match router.current() {
                Some(current) if current.path() == LOGIN_PATH => None,
                Some(current) => Some(login_redirect(current)),
                None => Some(Location::new(LOGIN_PATH)),
            };
            if let Some(target) = target {
                tracing::info!(to = %target, "session expired, returning to login");
                if let Err(e) = router.replace(target, false) {
                    tracing::warn!(error = %e, "failed to navigate to login");
                }
            }
        }

        self.notices.lock().push(Notice::session_expired());
    }

    /// Signs in and navigates to the pending `redirect` target or the
    /// landing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, the session cannot be stored, or
    /// the target cannot be resolved.
    pub async fn login(&self, credentials: &LoginRequest) -> ApplicationResult<Navigation> {
        let response: LoginResponse = self.send(&api::auth::login(credentials)).await?;
        self.state.login(response.token, response.user).await?;

        let target = self
            .current_location()
            .and_then(|current| current.query(REDIRECT_PARAM).and_then(safe_target))
            .unwrap_or_else(|| Location::new(LANDING_PATH));
        Ok(self.navigate(target)?)
    }

    /// Creates an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns the gateway's `ApiError`.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.send(&api::auth::register(payload)).await
    }

    /// Signs out and replaces the current location with the login page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be cleared.
    pub async fn logout(&self) -> ApplicationResult<Navigation> {
        self.state.logout().await?;
        self.notices
            .lock()
            .push(Notice::new(NoticeKind::SignedOut, "Signed out"));
        Ok(self.router.lock().replace(Location::new(LOGIN_PATH), false)?)
    }

    /// Drains pending notices.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}

/// Accepts only in-app absolute paths as post-login targets.
fn safe_target(raw: &str) -> Option<Location> {
    if raw.starts_with("//") {
        return None;
    }
    Location::parse(raw).ok()
}
