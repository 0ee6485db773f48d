//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutating handler loads it,
//! applies one change, saves it back and responds with the updated cart.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use parcel_core::checkout::{Coupon, FREE_SHIPPING_THRESHOLD, OrderSummary};
use parcel_core::{Cart, CartItem, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::cart::{clear_cart, load_cart, load_coupon, save_cart, save_coupon};
use crate::state::AppState;

/// One cart line with its total.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub item: CartItem,
    pub line_total: Price,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total_items: u32,
    /// Redeemed coupon code, if any.
    pub coupon: Option<String>,
    pub summary: OrderSummary,
    pub free_shipping_threshold: Price,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, coupon: Option<&Coupon>) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartLineView {
                    item: item.clone(),
                    line_total: item.line_total(),
                })
                .collect(),
            total_items: cart.total_items(),
            coupon: coupon.map(|c| c.code.clone()),
            summary: OrderSummary::estimate(cart, coupon),
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
        }
    }
}

async fn cart_view(session: &Session, cart: &Cart) -> Result<Json<CartView>> {
    let coupon = load_coupon(session).await?;
    Ok(Json(CartView::new(cart, coupon.as_ref())))
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Units to add (default 1).
    pub quantity: Option<u32>,
}

/// Update quantity request. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Coupon request.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CouponResponse {
    pub message: &'static str,
    pub cart: CartView,
}

#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Display cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    cart_view(&session, &cart).await
}

/// Cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.total_items(),
    }))
}

/// Add item to cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get_by_id(&form.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let mut cart = load_cart(&session).await?;
    let quantity = cart.add_quantity(product, form.quantity.unwrap_or(1))?;
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product.id.as_str())]),
    );
    tracing::debug!(product_id = %product.id, quantity, "Added to cart");

    cart_view(&session, &cart).await
}

/// Update line quantity.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(form): Json<UpdateCartForm>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.set_quantity(&form.product_id, form.quantity)?;
    save_cart(&session, &cart).await?;

    cart_view(&session, &cart).await
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.remove_item(&form.product_id).is_some() {
        save_cart(&session, &cart).await?;
    }

    cart_view(&session, &cart).await
}

/// Empty the cart and drop any coupon.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    clear_cart(&session).await?;
    Ok(Json(CartView::new(&Cart::new(), None)))
}

/// Redeem a coupon code.
#[instrument(skip(session))]
pub async fn apply_coupon(
    session: Session,
    Json(form): Json<CouponForm>,
) -> Result<Json<CouponResponse>> {
    let coupon = Coupon::redeem(&form.code)?;
    save_coupon(&session, &coupon).await?;

    let cart = load_cart(&session).await?;
    Ok(Json(CouponResponse {
        message: "Coupon applied successfully!",
        cart: CartView::new(&cart, Some(&coupon)),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parcel_core::Catalog;

    use super::*;

    #[test]
    fn test_cart_view_totals() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        for product in catalog.products().iter().take(2) {
            cart.add_item(product).unwrap();
        }

        let view = CartView::new(&cart, None);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total_items, 2);
        assert_eq!(view.summary.subtotal, cart.total_price());
        assert!(view.coupon.is_none());
    }

    #[test]
    fn test_cart_view_applies_coupon() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add_item(catalog.products().first().unwrap()).unwrap();
        let coupon = Coupon::redeem("DISCOUNT20").unwrap();

        let view = CartView::new(&cart, Some(&coupon));
        assert_eq!(view.coupon.as_deref(), Some("DISCOUNT20"));
        assert_eq!(view.summary.discount, cart.total_price().percentage(20));
    }
}
