//! Authentication route handlers.
//!
//! Sign-in, registration and sign-out against the configured auth provider.
//! The signed-in user is kept in the visitor's session under the `user` key.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use parcel_core::SessionUser;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::services::auth::RegistrationRequest;
use crate::services::session::UserSession;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub accept_terms: bool,
}

impl From<RegisterForm> for RegistrationRequest {
    fn from(form: RegisterForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: SecretString::from(form.password),
            confirm_password: SecretString::from(form.confirm_password),
            accept_terms: form.accept_terms,
        }
    }
}

/// Response carrying a user-facing message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: SessionUser,
}

// =============================================================================
// Routes
// =============================================================================

/// Handle login.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>> {
    let password = SecretString::from(form.password);
    let user = UserSession::new(&session, state.auth())
        .login(&form.email, &password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed: {e}"))?;

    // New session id on privilege change
    session.cycle_id().await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(Json(LoginResponse {
        message: format!("Welcome back, {}!", user.name),
        user,
    }))
}

/// Handle registration.
///
/// Validates the form and reports success, but never creates an account; the
/// visitor still has to sign in with a demo account.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let request = RegistrationRequest::from(form);
    UserSession::new(&session, state.auth())
        .register(&request)
        .await
        .inspect_err(|e| tracing::warn!("Registration failed: {e}"))?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Registration successful! Please log in."),
    ))
}

/// Handle logout.
///
/// Removes the signed-in user but keeps the cart.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Json<MessageResponse>> {
    UserSession::new(&session, state.auth()).logout().await?;
    session.cycle_id().await?;
    clear_sentry_user();

    Ok(MessageResponse::new("You have been logged out"))
}
