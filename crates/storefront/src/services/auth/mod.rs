//! Authentication service.
//!
//! Sign-in checks an email/password pair against a fixed table of demo
//! accounts. Registration validates the form and rejects addresses that are
//! already taken, but never creates an account. None of this is a security
//! boundary: the demo passwords are plaintext constants.

mod error;

pub use error::AuthError;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use parcel_core::{Email, SessionUser, UserId, UserRole};

use super::BoxFuture;

/// A registration attempt.
#[derive(Debug)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub accept_terms: bool,
}

/// Checks credentials and registrations.
pub trait AuthProvider: Send + Sync {
    /// Resolve an email/password pair to a user.
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
    ) -> BoxFuture<'a, Result<SessionUser, AuthError>>;

    /// Validate a registration.
    fn register<'a>(&'a self, request: &'a RegistrationRequest) -> BoxFuture<'a, Result<(), AuthError>>;
}

/// Validate a registration form, returning the parsed email.
///
/// Checks run in form order: name, email, password, confirmation, terms.
///
/// # Errors
///
/// Returns the first failing check as an `AuthError`.
pub fn validate_registration(request: &RegistrationRequest) -> Result<Email, AuthError> {
    if request.name.trim().is_empty() {
        return Err(AuthError::MissingName);
    }
    let email = Email::parse(&request.email)?;
    if request.password.expose_secret().is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if request.password.expose_secret() != request.confirm_password.expose_secret() {
        return Err(AuthError::PasswordMismatch);
    }
    if !request.accept_terms {
        return Err(AuthError::TermsNotAccepted);
    }
    Ok(email)
}

/// A demo account: the user plus its plaintext password.
pub struct DemoAccount {
    pub user: SessionUser,
    pub password: SecretString,
}

impl std::fmt::Debug for DemoAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoAccount")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Auth provider backed by a fixed account table.
#[derive(Debug)]
pub struct DemoAuthProvider {
    accounts: Vec<DemoAccount>,
    latency: Duration,
}

impl DemoAuthProvider {
    /// A provider over `accounts`, delaying every call by `latency`.
    #[must_use]
    pub const fn new(accounts: Vec<DemoAccount>, latency: Duration) -> Self {
        Self { accounts, latency }
    }

    /// The two built-in demo accounts (one admin, one customer).
    #[must_use]
    pub fn with_demo_accounts(latency: Duration) -> Self {
        let account = |id: &str, name: &str, email: &'static str, role, password: &str| DemoAccount {
            user: SessionUser {
                id: UserId::new(id),
                name: name.to_owned(),
                email: Email::from_static(email),
                role,
            },
            password: SecretString::from(password.to_owned()),
        };

        Self::new(
            vec![
                account("1", "Admin User", "admin@example.com", UserRole::Admin, "admin123"),
                account("2", "Test User", "user@example.com", UserRole::Customer, "user123"),
            ],
            latency,
        )
    }

    fn find(&self, email: &str) -> Option<&DemoAccount> {
        let email = email.trim();
        self.accounts.iter().find(|a| a.user.email.as_str() == email)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl AuthProvider for DemoAuthProvider {
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
    ) -> BoxFuture<'a, Result<SessionUser, AuthError>> {
        Box::pin(async move {
            self.simulate_latency().await;

            let account = self.find(email).ok_or(AuthError::InvalidCredentials)?;
            if account.password.expose_secret() != password.expose_secret() {
                return Err(AuthError::InvalidCredentials);
            }
            Ok(account.user.clone())
        })
    }

    fn register<'a>(&'a self, request: &'a RegistrationRequest) -> BoxFuture<'a, Result<(), AuthError>> {
        Box::pin(async move {
            let email = validate_registration(request)?;
            self.simulate_latency().await;

            if self.find(email.as_str()).is_some() {
                return Err(AuthError::EmailInUse);
            }
            tracing::info!(email = %email.domain(), "Registration accepted (not persisted)");
            Ok(())
        })
    }
}
