//! Global application state.
//!
//! `AppState` is the in-memory mirror of the persisted session and the only
//! place session state may be mutated. Every mutation is written through to
//! the `SessionStore` immediately. Observers subscribe to a `watch` channel.

use medportal_domain::{Session, UserProfile};
use tokio::sync::watch;

use crate::ports::StorageError;
use crate::session_store::SessionStore;

/// Observable session state shared by the whole client.
#[derive(Debug)]
pub struct AppState {
    store: SessionStore,
    session: watch::Sender<Session>,
}

impl AppState {
    /// Loads the persisted session into a new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn init(store: SessionStore) -> Result<Self, StorageError> {
        let session = Session {
            token: store.get_token().await?.unwrap_or_default(),
            user: store.get_user().await?,
        };
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "session restored"
        );

        let (sender, _) = watch::channel(session);
        Ok(Self {
            store,
            session: sender,
        })
    }

    /// Signs in: sets the token, then the user. Each value is persisted
    /// before it becomes visible, so memory never runs ahead of storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn login(
        &self,
        token: impl Into<String>,
        user: Option<UserProfile>,
    ) -> Result<(), StorageError> {
        let token = token.into();

        self.store.set_token(&token).await?;
        self.session.send_modify(|s| s.token.clone_from(&token));

        self.store.set_user(user.as_ref()).await?;
        self.session.send_modify(|s| s.user.clone_from(&user));

        tracing::info!(user_id = ?self.current_user_id(), "signed in");
        Ok(())
    }

    /// Signs out: clears the in-memory session and the persisted one.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be cleared.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.session.send_replace(Session::empty());
        self.store.clear_auth().await?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Returns true if the session holds a non-empty token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.borrow().token().map(str::to_string)
    }

    /// Returns the current user profile.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.borrow().user.clone()
    }

    /// Returns the current user's identifier.
    #[must_use]
    pub fn current_user_id(&self) -> Option<String> {
        self.session.borrow().user.as_ref().and_then(UserProfile::id)
    }

    /// Returns a copy of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }
}
