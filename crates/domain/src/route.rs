//! Static route table
//!
//! Routes are declared once at startup and only consulted afterwards.
//! Resolution returns the matched chain (parent records first) so that
//! metadata on a layout route applies to all of its children.

use serde::{Deserialize, Serialize};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path of the registration page.
pub const REGISTER_PATH: &str = "/auth/register";

/// Landing route for authenticated users.
pub const LANDING_PATH: &str = "/index";

/// Metadata attached to a route record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Human-readable title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The route is only reachable with a session.
    #[serde(default)]
    pub requires_auth: bool,
    /// The route is a login/registration page.
    #[serde(default)]
    pub is_auth_page: bool,
}

/// Access class of a matched route chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    /// Reachable by anyone.
    Public,
    /// Reachable only with a session.
    AuthOnly,
    /// Login/registration page; reachable only without a session.
    AuthPageOnly,
}

impl RouteKind {
    /// Classifies a single record's flags.
    ///
    /// A record carrying both flags is treated as an auth page.
    #[must_use]
    pub const fn from_meta(meta: &RouteMeta) -> Self {
        if meta.is_auth_page {
            Self::AuthPageOnly
        } else if meta.requires_auth {
            Self::AuthOnly
        } else {
            Self::Public
        }
    }

    /// Classifies a matched chain.
    ///
    /// Any auth-page record wins over any requires-auth record.
    #[must_use]
    pub fn of_chain(chain: &[&RouteDescriptor]) -> Self {
        if chain.iter().any(|r| r.meta.is_auth_page) {
            Self::AuthPageOnly
        } else if chain.iter().any(|r| r.meta.requires_auth) {
            Self::AuthOnly
        } else {
            Self::Public
        }
    }
}

/// A route record: a path segment, an optional view, metadata and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Absolute path for top-level records, relative segment for children.
    pub path: String,
    /// Identifier of the view rendered for this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// Route metadata.
    #[serde(default)]
    pub meta: RouteMeta,
    /// Target to redirect to when this record is the deepest match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// Nested routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    /// Creates a record for `path` rendering `view`.
    #[must_use]
    pub fn new(path: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view: Some(view.into()),
            meta: RouteMeta::default(),
            redirect: None,
            children: Vec::new(),
        }
    }

    /// Creates a record with no view of its own (a pass-through layout).
    #[must_use]
    pub fn layout(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view: None,
            meta: RouteMeta::default(),
            redirect: None,
            children: Vec::new(),
        }
    }

    /// Creates a record that only redirects.
    #[must_use]
    pub fn redirect(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            redirect: Some(target.into()),
            ..Self::layout(path)
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.meta.name = Some(name.into());
        self
    }

    /// Marks the record as requiring a session.
    #[must_use]
    pub const fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    /// Marks the record as a login/registration page.
    #[must_use]
    pub const fn auth_page(mut self) -> Self {
        self.meta.is_auth_page = true;
        self
    }

    /// Sets the redirect target.
    #[must_use]
    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    /// Sets the child routes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Returns the access class of this record alone.
    #[must_use]
    pub const fn kind(&self) -> RouteKind {
        RouteKind::from_meta(&self.meta)
    }
}

/// Outcome of resolving a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    /// The path matched a chain of records, outermost first.
    Matched(Vec<&'a RouteDescriptor>),
    /// The path must be redirected before any guard runs.
    Redirect(String),
}

/// The application's route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    fallback: Option<String>,
}

impl RouteTable {
    /// Creates a table with no catch-all fallback.
    #[must_use]
    pub const fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self {
            routes,
            fallback: None,
        }
    }

    /// Sets the redirect target for paths that match nothing.
    #[must_use]
    pub fn with_fallback(mut self, target: impl Into<String>) -> Self {
        self.fallback = Some(target.into());
        self
    }

    /// Returns the top-level records.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Returns the catch-all redirect target.
    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Resolves `path` (without query) against the table.
    ///
    /// Returns `None` when nothing matches and there is no fallback.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = trim_path(path);
        let chain = self
            .routes
            .iter()
            .find_map(|route| match_record(route, "", path));

        match chain {
            Some(chain) => match chain.last().and_then(|leaf| leaf.redirect.clone()) {
                Some(target) => Some(RouteMatch::Redirect(target)),
                None => Some(RouteMatch::Matched(chain)),
            },
            None => self
                .fallback
                .as_ref()
                .map(|target| RouteMatch::Redirect(target.clone())),
        }
    }

    /// Lists every reachable path with its chain kind and view.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, RouteKind, Option<&str>)> {
        fn walk<'a>(
            record: &'a RouteDescriptor,
            prefix: &str,
            parents: &mut Vec<&'a RouteDescriptor>,
            out: &mut Vec<(String, RouteKind, Option<&'a str>)>,
        ) {
            let full = join(prefix, &record.path);
            parents.push(record);
            out.push((full.clone(), RouteKind::of_chain(parents), record.view.as_deref()));
            for child in &record.children {
                walk(child, &full, parents, out);
            }
            parents.pop();
        }

        let mut out = Vec::new();
        for route in &self.routes {
            walk(route, "", &mut Vec::new(), &mut out);
        }
        out
    }

    /// The portal's route table.
    #[must_use]
    pub fn portal() -> Self {
        Self::new(vec![
            RouteDescriptor::redirect("/", LOGIN_PATH),
            RouteDescriptor::new("/index", "Index")
                .named("Overview")
                .requires_auth(),
            RouteDescriptor::new("/pred", "Pred")
                .named("Online prediction")
                .requires_auth(),
            RouteDescriptor::new("/tableData", "TableData")
                .named("Data analysis")
                .requires_auth(),
            RouteDescriptor::new("/physiology", "PhysiologyLayout")
                .named("Physical health")
                .requires_auth()
                .redirect_to("/physiology/dashboard")
                .with_children(vec![
                    RouteDescriptor::new("dashboard", "PhysiologyDashboard").named("Dashboard"),
                    RouteDescriptor::new("metrics", "PhysiologyMetrics").named("Metrics"),
                    RouteDescriptor::new("plans", "PhysiologyPlans").named("Plans"),
                ]),
            RouteDescriptor::new("/mental", "MentalLayout")
                .named("Mental health")
                .requires_auth()
                .with_children(vec![
                    RouteDescriptor::new("", "MentalHealth").named("Overview"),
                    RouteDescriptor::new("emotion", "EmotionRecord").named("Emotion log"),
                    RouteDescriptor::new("assessment", "PsychologicalTest").named("Assessment"),
                    RouteDescriptor::new("ai", "AICompanion").named("AI companion"),
                    RouteDescriptor::new("growth", "GrowthPlan").named("Growth plan"),
                ]),
            RouteDescriptor::new("/articles", "ArticleHub")
                .named("Health articles")
                .requires_auth(),
            RouteDescriptor::layout("/auth").with_children(vec![
                RouteDescriptor::new(LOGIN_PATH, "Login").auth_page(),
                RouteDescriptor::new(REGISTER_PATH, "Register").auth_page(),
            ]),
            RouteDescriptor::new("/profile", "ProfilePage")
                .named("Profile")
                .requires_auth(),
        ])
        .with_fallback(LOGIN_PATH)
    }
}

/// Depth-first match; children are tried before the record itself.
fn match_record<'a>(
    record: &'a RouteDescriptor,
    prefix: &str,
    path: &str,
) -> Option<Vec<&'a RouteDescriptor>> {
    let full = join(prefix, &record.path);
    if !is_prefix_of(&full, path) {
        return None;
    }

    for child in &record.children {
        if let Some(mut rest) = match_record(child, &full, path) {
            rest.insert(0, record);
            return Some(rest);
        }
    }

    (full == path).then(|| vec![record])
}

fn join(prefix: &str, segment: &str) -> String {
    if segment.starts_with('/') || prefix.is_empty() {
        return trim_path(segment).to_string();
    }
    if segment.is_empty() {
        return prefix.to_string();
    }
    trim_path(&format!("{}/{segment}", prefix.trim_end_matches('/'))).to_string()
}

fn trim_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn is_prefix_of(candidate: &str, path: &str) -> bool {
    candidate == "/"
        || path == candidate
        || path
            .strip_prefix(candidate)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matched_views<'a>(table: &'a RouteTable, path: &str) -> Vec<Option<&'a str>> {
        match table.resolve(path) {
            Some(RouteMatch::Matched(chain)) => chain.iter().map(|r| r.view.as_deref()).collect(),
            other => panic!("expected a match for {path}, got {other:?}"),
        }
    }

    #[test]
    fn root_redirects_to_login() {
        let table = RouteTable::portal();
        assert_eq!(
            table.resolve("/"),
            Some(RouteMatch::Redirect(LOGIN_PATH.to_string()))
        );
    }

    #[test]
    fn nested_child_matches_with_parent_chain() {
        let table = RouteTable::portal();
        assert_eq!(
            matched_views(&table, "/physiology/metrics"),
            vec![Some("PhysiologyLayout"), Some("PhysiologyMetrics")]
        );
        assert_eq!(
            matched_views(&table, LOGIN_PATH),
            vec![None, Some("Login")]
        );
        assert_eq!(
            matched_views(&table, REGISTER_PATH),
            vec![None, Some("Register")]
        );
    }

    #[test]
    fn empty_child_path_matches_parent_path() {
        let table = RouteTable::portal();
        assert_eq!(
            matched_views(&table, "/mental"),
            vec![Some("MentalLayout"), Some("MentalHealth")]
        );
    }

    #[test]
    fn parent_redirect_applies_when_parent_is_the_leaf() {
        let table = RouteTable::portal();
        assert_eq!(
            table.resolve("/physiology"),
            Some(RouteMatch::Redirect("/physiology/dashboard".to_string()))
        );
    }

    #[test]
    fn unknown_path_falls_back() {
        let table = RouteTable::portal();
        assert_eq!(
            table.resolve("/does/not/exist"),
            Some(RouteMatch::Redirect(LOGIN_PATH.to_string()))
        );
        assert_eq!(
            table.resolve("/indexes"),
            Some(RouteMatch::Redirect(LOGIN_PATH.to_string()))
        );
    }

    #[test]
    fn unknown_path_without_fallback_is_none() {
        let table = RouteTable::new(vec![RouteDescriptor::new("/a", "A")]);
        assert_eq!(table.resolve("/b"), None);
    }

    #[test]
    fn chain_kind_inherits_parent_flags() {
        let table = RouteTable::portal();
        let Some(RouteMatch::Matched(chain)) = table.resolve("/mental/emotion") else {
            panic!("expected match");
        };
        assert_eq!(RouteKind::of_chain(&chain), RouteKind::AuthOnly);

        let Some(RouteMatch::Matched(chain)) = table.resolve("/auth/register") else {
            panic!("expected match");
        };
        assert_eq!(RouteKind::of_chain(&chain), RouteKind::AuthPageOnly);
    }

    #[test]
    fn auth_page_flag_wins_over_requires_auth() {
        let both = RouteDescriptor::new("/odd", "Odd").requires_auth().auth_page();
        assert_eq!(both.kind(), RouteKind::AuthPageOnly);

        let parent = RouteDescriptor::layout("/p").requires_auth();
        let child = RouteDescriptor::new("c", "C").auth_page();
        assert_eq!(RouteKind::of_chain(&[&parent, &child]), RouteKind::AuthPageOnly);
    }

    #[test]
    fn entries_lists_full_paths() {
        let table = RouteTable::portal();
        let entries = table.entries();
        assert!(entries
            .iter()
            .any(|(p, k, v)| p == "/physiology/plans" && *k == RouteKind::AuthOnly && *v == Some("PhysiologyPlans")));
        assert!(entries
            .iter()
            .any(|(p, k, _)| p == "/auth/login" && *k == RouteKind::AuthPageOnly));
        assert!(entries
            .iter()
            .any(|(p, k, _)| p == "/auth/register" && *k == RouteKind::AuthPageOnly));
    }
}
