//! Payment gateway.
//!
//! Checkout charges the order total through a [`PaymentGateway`]. The only
//! implementation is [`MockPaymentGateway`], which approves every valid
//! charge after a configurable delay.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use parcel_core::Price;
use parcel_core::checkout::PaymentMethod;

use super::BoxFuture;

/// Errors returned by a payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The charge amount is negative.
    #[error("invalid payment amount: {0}")]
    InvalidAmount(Price),

    /// The processor refused the charge.
    #[error("payment declined: {0}")]
    Declined(String),
}

/// A charge to collect.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Price,
    pub method: PaymentMethod,
    /// Receipt email.
    pub email: String,
}

/// Proof of a successful charge.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: Price,
    pub method: PaymentMethod,
    pub processed_at: DateTime<Utc>,
}

/// Collects payments.
pub trait PaymentGateway: Send + Sync {
    /// Charge `request.amount` using `request.method`.
    fn charge<'a>(&'a self, request: &'a PaymentRequest) -> BoxFuture<'a, Result<PaymentReceipt, PaymentError>>;
}

/// Gateway that approves every non-negative charge, including free orders.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentGateway {
    latency: Duration,
}

impl MockPaymentGateway {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl PaymentGateway for MockPaymentGateway {
    fn charge<'a>(&'a self, request: &'a PaymentRequest) -> BoxFuture<'a, Result<PaymentReceipt, PaymentError>> {
        Box::pin(async move {
            if request.amount.is_negative() {
                return Err(PaymentError::InvalidAmount(request.amount));
            }
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            let reference = format!("pay_{}", Uuid::new_v4().simple());
            tracing::info!(
                reference = %reference,
                amount = %request.amount,
                method = ?request.method,
                "Mock payment approved"
            );

            Ok(PaymentReceipt {
                reference,
                amount: request.amount,
                method: request.method,
                processed_at: Utc::now(),
            })
        })
    }
}
