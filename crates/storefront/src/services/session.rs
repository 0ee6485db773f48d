//! Signed-in user lifecycle.
//!
//! The user is persisted as a JSON string under [`session_keys::USER`] in whatever
//! [`KeyValueStore`] the caller supplies. Handlers pass the visitor's HTTP
//! session; tests and tooling can pass an [`InMemoryStore`](super::storage::InMemoryStore).

use secrecy::SecretString;
use tracing::instrument;

use parcel_core::SessionUser;

use super::auth::{AuthError, AuthProvider, RegistrationRequest};
use super::storage::{KeyValueStore, StorageError};
use crate::models::session_keys;

/// Read the signed-in user from `store`.
///
/// A value that no longer deserializes is logged and treated as signed out.
///
/// # Errors
///
/// Returns an error only if the store itself fails.
pub async fn restore_user(store: &dyn KeyValueStore) -> Result<Option<SessionUser>, StorageError> {
    let Some(raw) = store.get(session_keys::USER).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable stored user");
            Ok(None)
        }
    }
}

/// Sign-in state for one visitor.
pub struct UserSession<'a> {
    store: &'a dyn KeyValueStore,
    auth: &'a dyn AuthProvider,
}

impl<'a> UserSession<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KeyValueStore, auth: &'a dyn AuthProvider) -> Self {
        Self { store, auth }
    }

    /// The currently signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn restore(&self) -> Result<Option<SessionUser>, StorageError> {
        restore_user(self.store).await
    }

    /// Check credentials and persist the user on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a bad pair, or a storage
    /// error if the user cannot be saved.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SessionUser, AuthError> {
        let user = self.auth.authenticate(email, password).await?;
        let json = serde_json::to_string(&user)?;
        self.store.set(session_keys::USER, json).await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "User signed in");
        Ok(user)
    }

    /// Validate a registration. Does not sign the visitor in.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure or `AuthError::EmailInUse`.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<(), AuthError> {
        self.auth.register(request).await
    }

    /// Forget the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(session_keys::USER).await?;
        tracing::info!("User signed out");
        Ok(())
    }
}
