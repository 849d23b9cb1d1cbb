//! Client-side router.
//!
//! Resolves a target location against the `RouteTable`, follows table
//! redirects and guard redirects until a location is allowed, and keeps the
//! navigation history.

use medportal_domain::{
    DomainError, GuardDecision, Location, RouteKind, RouteMatch, RouteTable, decide,
};
use thiserror::Error;

/// Upper bound on redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Navigation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// No record matches and the table has no fallback.
    #[error("no route matches '{0}'")]
    NotFound(String),

    /// Redirects did not settle.
    #[error("too many redirects while navigating to '{0}'")]
    RedirectLoop(String),

    /// A target could not be parsed.
    #[error(transparent)]
    InvalidTarget(#[from] DomainError),
}

/// A committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Where the router ended up.
    pub location: Location,
    /// View of the matched leaf record.
    pub view: Option<String>,
    /// True if any redirect was followed.
    pub redirected: bool,
}

/// Route resolution plus history.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    history: Vec<Location>,
}

impl Router {
    /// Creates a router with empty history.
    #[must_use]
    pub const fn new(table: RouteTable) -> Self {
        Self {
            table,
            history: Vec::new(),
        }
    }

    /// Returns the route table.
    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns the current location, if any navigation was committed.
    #[must_use]
    pub fn current(&self) -> Option<&Location> {
        self.history.last()
    }

    /// Returns every committed location, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Location] {
        &self.history
    }

    /// Resolves `target` without committing it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when nothing matches, `RedirectLoop` after
    /// `MAX_REDIRECTS` hops, and `InvalidTarget` for unparsable redirects.
    pub fn resolve(
        &self,
        target: Location,
        is_authenticated: bool,
    ) -> Result<Navigation, NavigationError> {
        let requested = target.full_path();
        let mut to = target;
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            let next = match self.table.resolve(to.path()) {
                None => return Err(NavigationError::NotFound(to.full_path())),
                Some(RouteMatch::Redirect(raw)) => Location::parse(&raw)?.inherit_query(&to),
                Some(RouteMatch::Matched(chain)) => {
                    match decide(RouteKind::of_chain(&chain), is_authenticated, &to) {
                        GuardDecision::Allow => {
                            let view = chain.last().and_then(|leaf| leaf.view.clone());
                            return Ok(Navigation {
                                location: to,
                                view,
                                redirected,
                            });
                        }
                        GuardDecision::RedirectTo(next) => next,
                    }
                }
            };

            tracing::debug!(from = %to, to = %next, "redirecting");
            to = next;
            redirected = true;
        }

        tracing::warn!(target = %requested, "redirect limit reached");
        Err(NavigationError::RedirectLoop(requested))
    }

    /// Resolves `target` and appends the result to history.
    ///
    /// # Errors
    ///
    /// See [`Router::resolve`]. History is untouched on error.
    pub fn push(
        &mut self,
        target: Location,
        is_authenticated: bool,
    ) -> Result<Navigation, NavigationError> {
        let navigation = self.resolve(target, is_authenticated)?;
        self.history.push(navigation.location.clone());
        Ok(navigation)
    }

    /// Resolves `target` and overwrites the current history entry.
    ///
    /// # Errors
    ///
    /// See [`Router::resolve`]. History is untouched on error.
    pub fn replace(
        &mut self,
        target: Location,
        is_authenticated: bool,
    ) -> Result<Navigation, NavigationError> {
        let navigation = self.resolve(target, is_authenticated)?;
        self.history.pop();
        self.history.push(navigation.location.clone());
        Ok(navigation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use medportal_domain::{LANDING_PATH, LOGIN_PATH, RouteDescriptor};
    use pretty_assertions::assert_eq;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn portal() -> Router {
        Router::new(RouteTable::portal())
    }

    #[test]
    fn root_redirects_to_login() {
        let nav = portal().resolve(loc("/"), false).unwrap();
        assert_eq!(nav.location, loc(LOGIN_PATH));
        assert!(nav.redirected);
    }

    #[test]
    fn protected_route_sends_anonymous_user_to_login() {
        let nav = portal()
            .resolve(loc("/physiology/metrics?range=7d"), false)
            .unwrap();
        assert_eq!(
            nav.location.full_path(),
            "/auth/login?redirect=%2Fphysiology%2Fmetrics%3Frange%3D7d"
        );
        assert_eq!(nav.location.query("redirect"), Some("/physiology/metrics?range=7d"));
    }

    #[test]
    fn authenticated_user_reaches_protected_route() {
        let nav = portal().resolve(loc("/pred"), true).unwrap();
        assert_eq!(nav.location, loc("/pred"));
        assert_eq!(nav.view.as_deref(), Some("Pred"));
        assert!(!nav.redirected);
    }

    #[test]
    fn authenticated_user_leaves_auth_pages() {
        let nav = portal().resolve(loc("/auth/register"), true).unwrap();
        assert_eq!(nav.location, loc(LANDING_PATH));
    }

    #[test]
    fn anonymous_user_sees_auth_pages() {
        let nav = portal().resolve(loc("/auth/login"), false).unwrap();
        assert_eq!(nav.location, loc(LOGIN_PATH));
        assert!(!nav.redirected);
    }

    #[test]
    fn layout_redirect_lands_on_child() {
        let nav = portal().resolve(loc("/physiology"), true).unwrap();
        assert_eq!(nav.location, loc("/physiology/dashboard"));
        assert_eq!(nav.view.as_deref(), Some("PhysiologyDashboard"));
    }

    #[test]
    fn nested_child_inherits_parent_protection() {
        let nav = portal().resolve(loc("/mental/emotion"), false).unwrap();
        assert_eq!(nav.location.path(), LOGIN_PATH);
        assert_eq!(nav.location.query("redirect"), Some("/mental/emotion"));
    }

    #[test]
    fn unknown_path_falls_back_to_login() {
        let nav = portal().resolve(loc("/nope"), false).unwrap();
        assert_eq!(nav.location, loc(LOGIN_PATH));

        // Signed in, the fallback lands on login and the guard moves on.
        let nav = portal().resolve(loc("/nope"), true).unwrap();
        assert_eq!(nav.location, loc(LANDING_PATH));
    }

    #[test]
    fn unknown_path_without_fallback_is_not_found() {
        let router = Router::new(RouteTable::new(vec![RouteDescriptor::new("/a", "A")]));
        assert_eq!(
            router.resolve(loc("/b"), false),
            Err(NavigationError::NotFound("/b".to_string()))
        );
    }

    #[test]
    fn redirect_cycles_are_cut_off() {
        let router = Router::new(RouteTable::new(vec![
            RouteDescriptor::redirect("/a", "/b"),
            RouteDescriptor::redirect("/b", "/a"),
        ]));
        assert_eq!(
            router.resolve(loc("/a"), false),
            Err(NavigationError::RedirectLoop("/a".to_string()))
        );
    }

    #[test]
    fn push_and_replace_maintain_history() {
        let mut router = portal();
        router.push(loc("/"), false).unwrap();
        router.push(loc("/auth/register"), false).unwrap();
        assert_eq!(router.history().len(), 2);

        router.replace(loc("/auth/login"), false).unwrap();
        assert_eq!(router.history(), &[loc(LOGIN_PATH), loc(LOGIN_PATH)]);
        assert_eq!(router.current(), Some(&loc(LOGIN_PATH)));
    }

    #[test]
    fn failed_navigation_keeps_history() {
        let mut router = Router::new(RouteTable::new(vec![RouteDescriptor::new("/a", "A")]));
        router.push(loc("/a"), false).unwrap();
        assert!(router.push(loc("/b"), false).is_err());
        assert_eq!(router.current(), Some(&loc("/a")));
    }
}
