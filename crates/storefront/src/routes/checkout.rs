//! Checkout and order confirmation route handlers.
//!
//! Submitting the form validates it against the session cart, charges the
//! total through the payment gateway, then clears the cart and keeps the
//! order in the session for the confirmation page.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use parcel_core::Price;
use parcel_core::checkout::{Checkout, CheckoutForm, OrderSummary, ShippingMethod};
use parcel_core::order::{MAX_ORDER_SEQUENCE, Order};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::OptionalAuth;
use crate::routes::cart::CartLineView;
use crate::services::cart::{clear_cart, load_cart, load_coupon, load_last_order, save_last_order};
use crate::services::payment::PaymentRequest;
use crate::state::AppState;

const SHIPPING_METHODS: [ShippingMethod; 3] = [
    ShippingMethod::Standard,
    ShippingMethod::Express,
    ShippingMethod::NextDay,
];

/// A selectable shipping method.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingOption {
    pub method: ShippingMethod,
    pub label: &'static str,
    pub rate: Price,
    pub delivery_days: i64,
}

impl From<ShippingMethod> for ShippingOption {
    fn from(method: ShippingMethod) -> Self {
        Self {
            method,
            label: method.label(),
            rate: method.rate(),
            delivery_days: method.delivery_days(),
        }
    }
}

/// Checkout page query string.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutParams {
    /// Method to price the summary with (default standard).
    pub shipping_method: Option<ShippingMethod>,
}

/// Checkout page data.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub form: CheckoutForm,
    pub items: Vec<CartLineView>,
    pub summary: OrderSummary,
    pub shipping_options: Vec<ShippingOption>,
}

/// Placed order response.
#[derive(Debug, Serialize)]
pub struct OrderPlaced {
    pub message: &'static str,
    pub order: Order,
}

/// Display checkout form, prefilled for a signed-in user.
#[instrument(skip(session, user))]
pub async fn show(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<CheckoutParams>,
) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await?;
    let coupon = load_coupon(&session).await?;

    let mut form = CheckoutForm::prefilled(user.as_ref());
    if let Some(method) = params.shipping_method {
        form.shipping_method = method;
    }

    Ok(Json(CheckoutView {
        summary: OrderSummary::for_checkout(&cart, form.shipping_method, coupon.as_ref()),
        items: cart
            .items()
            .iter()
            .map(|item| CartLineView {
                item: item.clone(),
                line_total: item.line_total(),
            })
            .collect(),
        form,
        shipping_options: SHIPPING_METHODS.into_iter().map(ShippingOption::from).collect(),
    }))
}

/// Place the order.
#[instrument(skip(state, session, form), fields(shipping = ?form.shipping_method, payment = ?form.payment_method))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<OrderPlaced>)> {
    let cart = load_cart(&session).await?;
    let coupon = load_coupon(&session).await?;
    let checkout = Checkout::prepare(&cart, &form, coupon.as_ref())?;

    add_breadcrumb("checkout", "Processing payment", None);
    let receipt = state
        .payments()
        .charge(&PaymentRequest {
            amount: checkout.summary.total,
            method: checkout.payment_method,
            email: checkout.details.email.to_string(),
        })
        .await?;

    let sequence = rand::rng().random_range(0..=MAX_ORDER_SEQUENCE);
    let order = Order::from_checkout(checkout, sequence, Utc::now(), receipt.reference);

    clear_cart(&session).await?;
    save_last_order(&session, &order).await?;

    tracing::info!(
        order = %order.number,
        total = %order.summary.total,
        items = order.total_items(),
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderPlaced {
            message: "Your order has been placed successfully!",
            order,
        }),
    ))
}

/// Display the most recently placed order.
#[instrument(skip(session))]
pub async fn confirmation(session: Session) -> Result<Json<Order>> {
    load_last_order(&session)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No recent order found".to_string()))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_options_cover_every_method() {
        let options: Vec<ShippingOption> =
            SHIPPING_METHODS.into_iter().map(ShippingOption::from).collect();
        assert_eq!(options.len(), 3);
        assert_eq!(options[2].rate, Price::from_cents(2500));
        assert_eq!(options[2].delivery_days, 1);
        assert_eq!(options[0].label, "Standard Shipping");
    }
}
