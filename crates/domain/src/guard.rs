//! Navigation guard
//!
//! A pure decision function evaluated once per route transition. It never
//! touches storage or the router; callers pass in the authentication state.

use crate::location::{Location, REDIRECT_PARAM};
use crate::route::{LANDING_PATH, LOGIN_PATH, RouteKind};

/// Result of evaluating the guard for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the transition through unchanged.
    Allow,
    /// Abort the transition and go to this location instead.
    RedirectTo(Location),
}

impl GuardDecision {
    /// Returns true if the transition is allowed.
    #[must_use]
    pub const fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether a transition to `to` may proceed.
///
/// Rules, in order:
/// 1. Auth pages redirect signed-in users to the landing route.
/// 2. Protected routes redirect anonymous users to login, carrying
///    `to.full_path()` in the `redirect` query parameter.
/// 3. Everything else is allowed.
#[must_use]
pub fn decide(kind: RouteKind, is_authenticated: bool, to: &Location) -> GuardDecision {
    match (kind, is_authenticated) {
        (RouteKind::AuthPageOnly, true) => GuardDecision::RedirectTo(Location::new(LANDING_PATH)),
        (RouteKind::AuthOnly, false) => GuardDecision::RedirectTo(login_redirect(to)),
        _ => GuardDecision::Allow,
    }
}

/// Builds the login location that returns to `from` after signing in.
#[must_use]
pub fn login_redirect(from: &Location) -> Location {
    Location::new(LOGIN_PATH).with_query(REDIRECT_PARAM, from.full_path())
}
