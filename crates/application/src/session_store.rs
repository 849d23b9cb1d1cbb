//! Durable session storage.
//!
//! Persists the bearer token and user profile under two fixed keys of a
//! `KeyValueStorage`. The token is stored raw; the profile as JSON.

use std::sync::Arc;

use medportal_domain::UserProfile;

use crate::ports::{KeyValueStorage, StorageError};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "med-portal-token";

/// Storage key of the serialized user profile.
pub const USER_KEY: &str = "med-portal-user";

/// Reads and writes the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates a store on top of the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Returns the persisted token, or `None` if missing or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn get_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    /// Persists the token. An empty token leaves storage untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn set_token(&self, token: &str) -> Result<(), StorageError> {
        if token.is_empty() {
            return Ok(());
        }
        self.storage.set(TOKEN_KEY, token).await
    }

    /// Returns the persisted user profile.
    ///
    /// Data that does not parse as a profile is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn get_user(&self) -> Result<Option<UserProfile>, StorageError> {
        let Some(raw) = self.storage.get(USER_KEY).await? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(key = USER_KEY, error = %e, "ignoring malformed stored user");
                Ok(None)
            }
        }
    }

    /// Persists the user profile. `None` leaves storage untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be encoded or written.
    pub async fn set_user(&self, user: Option<&UserProfile>) -> Result<(), StorageError> {
        let Some(user) = user else {
            return Ok(());
        };
        let raw =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(USER_KEY, &raw).await
    }

    /// Removes the token, then the user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if either key cannot be removed.
    pub async fn clear_auth(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY).await?;
        self.storage.remove(USER_KEY).await
    }

    /// Returns true if a non-empty token is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self.get_token().await?.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MemoryKv;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn store() -> (SessionStore, Arc<MemoryKv>) {
        let kv = Arc::new(MemoryKv::default());
        (SessionStore::new(kv.clone()), kv)
    }

    fn user(value: serde_json::Value) -> UserProfile {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn token_round_trips() {
        let (store, _) = store();
        for token in ["abc", "eyJhbGciOiJIUzI1NiJ9.e30.sig", " spaced "] {
            store.set_token(token).await.unwrap();
            assert_eq!(store.get_token().await.unwrap().as_deref(), Some(token));
        }
    }

    #[tokio::test]
    async fn empty_token_does_not_overwrite() {
        let (store, _) = store();
        store.set_token("abc").await.unwrap();
        store.set_token("").await.unwrap();
        assert_eq!(store.get_token().await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn stored_empty_token_reads_as_none() {
        let (store, kv) = store();
        kv.set(TOKEN_KEY, "").await.unwrap();
        assert_eq!(store.get_token().await.unwrap(), None);
        assert!(!store.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn user_is_stored_as_json() {
        let (store, kv) = store();
        let profile = user(json!({ "userId": 1, "username": "ann" }));
        store.set_user(Some(&profile)).await.unwrap();

        let raw = kv.get(USER_KEY).await.unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            json!({ "userId": 1, "username": "ann" })
        );
        assert_eq!(store.get_user().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn absent_user_is_a_no_op() {
        let (store, _) = store();
        let profile = user(json!({ "userId": 1 }));
        store.set_user(Some(&profile)).await.unwrap();
        store.set_user(None).await.unwrap();
        assert_eq!(store.get_user().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn malformed_user_reads_as_none() {
        let (store, kv) = store();
        for raw in ["{not json", "null", "[1,2]"] {
            kv.set(USER_KEY, raw).await.unwrap();
            assert_eq!(store.get_user().await.unwrap(), None, "raw: {raw}");
        }
    }

    #[tokio::test]
    async fn clear_auth_removes_both_keys() {
        let (store, kv) = store();
        store.set_token("abc").await.unwrap();
        store.set_user(Some(&user(json!({ "userId": 1 })))).await.unwrap();

        store.clear_auth().await.unwrap();

        assert!(!store.is_authenticated().await.unwrap());
        assert_eq!(store.get_token().await.unwrap(), None);
        assert_eq!(store.get_user().await.unwrap(), None);
        assert!(kv.is_empty());

        // Idempotent.
        store.clear_auth().await.unwrap();
    }
}
