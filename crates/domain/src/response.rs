//! API response types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::{Header, find_header};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 401, the session is no longer accepted.
    pub const UNAUTHORIZED: Self = Self(401);

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true for 2xx.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true for 401.
    #[must_use]
    pub const fn is_unauthorized(self) -> bool {
        self.0 == Self::UNAUTHORIZED.0
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// A raw response as received by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: Vec<Header>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: u16, headers: Vec<Header>, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode(status),
            headers,
            body,
        }
    }

    /// Creates a response with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(
            status,
            vec![Header::new("Content-Type", "application/json")],
            body.to_string().into_bytes(),
        )
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns the body as a lossy UTF-8 string.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Extracts a human-readable error message from the body.
    ///
    /// Uses the `message` or `error` field of a JSON object body, falling
    /// back to the trimmed text, then to the reason phrase.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(&self.body) {
            if let Some(message) = ["message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
            {
                return message.to_string();
            }
        }

        let text = self.text();
        let text = text.trim();
        if text.is_empty() {
            self.status.reason_phrase().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn status_classification() {
        assert!(StatusCode(204).is_success());
        assert!(!StatusCode(301).is_success());
        assert!(StatusCode(401).is_unauthorized());
        assert!(!StatusCode(403).is_unauthorized());
        assert_eq!(StatusCode(404).to_string(), "404 Not Found");
    }

    #[test]
    fn error_message_prefers_json_fields() {
        let response = ApiResponse::json(400, &json!({ "message": "missing fields" }));
        assert_eq!(response.error_message(), "missing fields");

        let response = ApiResponse::json(500, &json!({ "error": "boom" }));
        assert_eq!(response.error_message(), "boom");
    }

    #[test]
    fn error_message_falls_back_to_text_then_reason() {
        let response = ApiResponse::new(502, Vec::new(), b"upstream down\n".to_vec());
        assert_eq!(response.error_message(), "upstream down");

        let response = ApiResponse::new(503, Vec::new(), Vec::new());
        assert_eq!(response.error_message(), "Service Unavailable");
    }
}
