//! Authentication error types.

use thiserror::Error;

use super::super::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("Please enter a valid email address: {0}")]
    InvalidEmail(#[from] parcel_core::EmailError),

    /// Wrong password or unknown email.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The email already belongs to an account.
    #[error("Email already in use")]
    EmailInUse,

    /// Registration name is blank.
    #[error("Please enter your name")]
    MissingName,

    /// Password is blank.
    #[error("Please enter a password")]
    MissingPassword,

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Terms and privacy policy were not accepted.
    #[error("Please accept the terms and privacy policy")]
    TermsNotAccepted,

    /// Session storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The signed-in user could not be serialized.
    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
