//! Navigation locations
//!
//! A `Location` is a client-side route target: an absolute path plus
//! ordered query parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{DomainError, DomainResult};

/// Query parameter used to carry the originally requested path to the login page.
pub const REDIRECT_PARAM: &str = "redirect";

/// A navigation target inside the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    path: String,
    #[serde(default)]
    query: Vec<(String, String)>,
}

impl Location {
    /// Creates a location for `path` with no query.
    ///
    /// Trailing slashes are dropped, except for the root path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            query: Vec::new(),
        }
    }

    /// Parses `path[?query]`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocation` if the path is not absolute.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let input = input.split('#').next().unwrap_or_default();
        let (path, query) = input.split_once('?').unwrap_or((input, ""));
        if !path.starts_with('/') {
            return Err(DomainError::InvalidLocation(input.to_string()));
        }

        let query = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            path: normalize_path(path),
            query,
        })
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Copies the query of `from` when this location has none of its own.
    #[must_use]
    pub fn inherit_query(mut self, from: &Self) -> Self {
        if self.query.is_empty() {
            self.query.clone_from(&from.query);
        }
        self
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in order.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the first value for a query key.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the path followed by the encoded query string, if any.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::parse(s)
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_splits_path_and_query() {
        let location = Location::parse("/workout?week=3&day=mon").unwrap();
        assert_eq!(location.path(), "/workout");
        assert_eq!(location.query("week"), Some("3"));
        assert_eq!(location.query("day"), Some("mon"));
        assert_eq!(location.query("missing"), None);
    }

    #[test]
    fn parse_rejects_relative_paths() {
        assert!(Location::parse("index").is_err());
        assert!(Location::parse("").is_err());
    }

    #[test]
    fn trailing_slash_is_dropped_except_root() {
        assert_eq!(Location::new("/mental/").path(), "/mental");
        assert_eq!(Location::new("/").path(), "/");
        assert_eq!(Location::parse("/?a=1").unwrap().path(), "/");
    }

    #[test]
    fn full_path_encodes_nested_redirect() {
        let inner = Location::parse("/physiology/metrics?range=7d").unwrap();
        let login = Location::new("/auth/login").with_query(REDIRECT_PARAM, inner.full_path());

        assert_eq!(
            login.full_path(),
            "/auth/login?redirect=%2Fphysiology%2Fmetrics%3Frange%3D7d"
        );

        let parsed = Location::parse(&login.full_path()).unwrap();
        assert_eq!(parsed.query(REDIRECT_PARAM), Some("/physiology/metrics?range=7d"));
    }

    #[test]
    fn inherit_query_only_fills_an_empty_query() {
        let from = Location::parse("/?utm=mail").unwrap();
        assert_eq!(
            Location::new("/auth/login").inherit_query(&from).full_path(),
            "/auth/login?utm=mail"
        );
        assert_eq!(
            Location::parse("/a?x=1").unwrap().inherit_query(&from).full_path(),
            "/a?x=1"
        );
    }

    #[test]
    fn full_path_without_query_is_plain_path() {
        assert_eq!(Location::new("/index").full_path(), "/index");
    }
}
