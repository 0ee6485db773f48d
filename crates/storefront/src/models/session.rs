//! Session keys.
//!
//! Everything a visitor accumulates lives in their `tower_sessions` session
//! under one of these keys.

/// Session keys for visitor state.
pub mod keys {
    /// JSON-serialized signed-in user.
    pub const USER: &str = "user";

    /// The visitor's cart.
    pub const CART: &str = "cart";

    /// Coupon redeemed on the cart page.
    pub const COUPON: &str = "coupon";

    /// Most recently placed order, shown on the confirmation page.
    pub const LAST_ORDER: &str = "last_order";
}
