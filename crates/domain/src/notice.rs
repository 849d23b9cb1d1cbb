//! User-visible notices raised by the client core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The server rejected the session; the user must sign in again.
    SessionExpired,
    /// The user signed out.
    SignedOut,
}

/// A message to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Notice category.
    pub kind: NoticeKind,
    /// Display text.
    pub message: String,
    /// When the notice was raised.
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    /// Creates a notice stamped with the current time.
    #[must_use]
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    /// The notice shown after a 401.
    #[must_use]
    pub fn session_expired() -> Self {
        Self::new(
            NoticeKind::SessionExpired,
            "Your session has expired, please sign in again",
        )
    }
}
