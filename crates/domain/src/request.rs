//! API request types
//!
//! `ApiRequest` is what feature code builds: a method, an API path, query
//! parameters and an optional JSON body. The gateway turns it into an
//! `OutgoingRequest` (absolute URL, final headers, encoded body) before
//! handing it to a transport.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// HTTP methods used by the portal API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(DomainError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// A single HTTP header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Header {
    /// Creates a header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Looks up a header value by case-insensitive name.
#[must_use]
pub fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// A call against the portal API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute API path, e.g. `/api/workout/plan`.
    pub path: String,
    /// Query parameters in order.
    #[serde(default)]
    pub query: Vec<(String, String)>,
    /// JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends every string, number or boolean field of a JSON object as a
    /// query parameter. Other values are skipped.
    #[must_use]
    pub fn query_object(mut self, params: &Value) -> Self {
        if let Value::Object(map) = params {
            for (key, value) in map {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                self.query.push((key.clone(), rendered));
            }
        }
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Checks that the path is absolute and has no `.` or `..` segments,
    /// which URL parsing would collapse into a different endpoint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` otherwise.
    pub fn validate(&self) -> DomainResult<()> {
        if self.path.starts_with('/') && !self.path.split('/').any(is_dot_segment) {
            Ok(())
        } else {
            Err(DomainError::InvalidPath(self.path.clone()))
        }
    }
}

/// A fully prepared request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: String,
    /// Headers to send.
    pub headers: Vec<Header>,
    /// Encoded body.
    pub body: Option<Vec<u8>>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OutgoingRequest {
    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Sets a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|h| !h.name.eq_ignore_ascii_case(&name));
        self.headers.push(Header::new(name, value));
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let segment = segment.to_ascii_lowercase().replace("%2e", ".");
    segment == "." || segment == ".."
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!(
            "TRACE".parse::<HttpMethod>(),
            Err(DomainError::UnsupportedMethod("TRACE".to_string()))
        );
    }

    #[test]
    fn query_object_keeps_scalars_only() {
        let mut request = ApiRequest::get("/api/workout/sessions")
            .query_object(&json!({ "page": 2, "status": "done", "tags": ["a"], "all": true }));
        request.query.sort();

        assert_eq!(
            request.query,
            vec![
                ("all".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
                ("status".to_string(), "done".to_string()),
            ]
        );
    }

    #[test]
    fn validate_requires_absolute_path() {
        assert!(ApiRequest::get("/api/risk/assessment").validate().is_ok());
        assert!(ApiRequest::get("api/risk").validate().is_err());
    }

    #[test]
    fn validate_rejects_dot_segments() {
        for path in ["/api/article/detail/..", "/api/./x", "/api/%2E%2e/x", "/api/.%2e"] {
            assert!(ApiRequest::get(path).validate().is_err(), "{path}");
        }
        assert!(ApiRequest::get("/api/article/detail/a..b").validate().is_ok());
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut request = OutgoingRequest {
            method: HttpMethod::Get,
            url: "http://localhost/api".to_string(),
            headers: vec![Header::new("authorization", "old")],
            body: None,
            timeout: Duration::from_secs(1),
        };
        request.set_header("Authorization", "Bearer new");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer new"));
    }
}
