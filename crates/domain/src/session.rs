//! Session types
//!
//! A session is the pair of bearer token and user profile held by the
//! client. An empty token always means "not signed in", whatever the
//! profile says.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile fields the backend may use for the user identifier, in lookup order.
const ID_FIELDS: [&str; 3] = ["user_id", "userId", "id"];

/// The signed-in user's profile as returned by the backend.
///
/// The record is opaque: every field the server sends is kept and written
/// back unchanged when the profile is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile {
    fields: Map<String, Value>,
}

impl UserProfile {
    /// Creates a profile from a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the user identifier, rendered as a string.
    ///
    /// Looks at `user_id`, then `userId`, then `id`. Numeric and string
    /// identifiers are both accepted.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        ID_FIELDS.iter().find_map(|key| match self.fields.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Returns a single profile field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the display name (`username`, falling back to `email`).
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.fields
            .get("username")
            .or_else(|| self.fields.get("email"))
            .and_then(Value::as_str)
    }

    /// Returns all profile fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// The client's authentication session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token; empty when signed out.
    pub token: String,
    /// Profile of the signed-in user.
    pub user: Option<UserProfile>,
}

impl Session {
    /// Creates an empty (signed out) session.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            token: String::new(),
            user: None,
        }
    }

    /// Returns true if the session carries a non-empty token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Returns the token, or `None` when it is empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        (!self.token.is_empty()).then_some(self.token.as_str())
    }
}
