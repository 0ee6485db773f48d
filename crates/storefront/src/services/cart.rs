//! Cart state in the visitor's HTTP session.
//!
//! Handlers load the cart at the start of a request and save it back after
//! mutating it. The redeemed coupon and the most recent order live alongside it.

use tower_sessions::Session;

use parcel_core::Cart;
use parcel_core::checkout::Coupon;
use parcel_core::order::Order;

use crate::models::session_keys;

use super::storage::StorageError;

/// Load the visitor's cart, or an empty cart for a new visitor.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, StorageError> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Save the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), StorageError> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// The coupon redeemed on the cart page, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_coupon(session: &Session) -> Result<Option<Coupon>, StorageError> {
    Ok(session.get::<Coupon>(session_keys::COUPON).await?)
}

/// Remember a redeemed coupon.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn save_coupon(session: &Session, coupon: &Coupon) -> Result<(), StorageError> {
    session.insert(session_keys::COUPON, coupon).await?;
    Ok(())
}

/// Empty the cart and drop any coupon.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn clear_cart(session: &Session) -> Result<(), StorageError> {
    session.remove::<Cart>(session_keys::CART).await?;
    session.remove::<Coupon>(session_keys::COUPON).await?;
    Ok(())
}

/// The order most recently placed in this session.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_last_order(session: &Session) -> Result<Option<Order>, StorageError> {
    Ok(session.get::<Order>(session_keys::LAST_ORDER).await?)
}

/// Remember a placed order for the confirmation page.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn save_last_order(session: &Session, order: &Order) -> Result<(), StorageError> {
    session.insert(session_keys::LAST_ORDER, order).await?;
    Ok(())
}
