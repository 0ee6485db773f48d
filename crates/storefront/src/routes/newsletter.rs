//! Newsletter subscription route handler.
//!
//! Subscriptions are acknowledged but not stored anywhere.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use parcel_core::Email;

use crate::error::{AppError, Result};

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: &'static str,
}

/// Subscribe to the newsletter.
#[instrument(skip(form))]
pub async fn subscribe(Json(form): Json<SubscribeForm>) -> Result<Json<SubscribeResponse>> {
    if form.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please enter your email address".to_string(),
        ));
    }

    let email = Email::parse(&form.email)
        .map_err(|_| AppError::BadRequest("Please enter a valid email address.".to_string()))?;
    tracing::info!(domain = %email.domain(), "Newsletter subscription");

    Ok(Json(SubscribeResponse {
        message: "Thank you for subscribing to our newsletter!",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(email: &str) -> Json<SubscribeForm> {
        Json(SubscribeForm {
            email: email.to_string(),
        })
    }

    #[tokio::test]
    async fn test_subscribe_accepts_valid_email() {
        let Json(response) = subscribe(form("reader@example.com")).await.unwrap();
        assert_eq!(
            response.message,
            "Thank you for subscribing to our newsletter!"
        );
    }

    #[tokio::test]
    async fn test_subscribe_rejects_blank_email() {
        let err = subscribe(form("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Please enter your email address"));
    }

    #[tokio::test]
    async fn test_subscribe_rejects_malformed_email() {
        let err = subscribe(form("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Please enter a valid email address."));
    }
}
