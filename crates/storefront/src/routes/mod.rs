//! HTTP route handlers for storefront.
//!
//! Every endpoint speaks JSON. Errors are `{"error": "<message>"}`.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products, categories)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /shop                   - Product listing (?q=&category=a,b&min_price=&max_price=&sort=)
//! GET  /categories             - Category labels
//! GET  /category/{category}    - Products in one category
//! GET  /product/{id}           - Product detail with related products
//!
//! # Cart
//! GET  /cart                   - Cart with order summary
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Update quantity (zero removes)
//! POST /cart/remove            - Remove item
//! POST /cart/clear             - Empty the cart
//! POST /cart/coupon            - Redeem a coupon code
//!
//! # Checkout
//! GET  /checkout               - Prefilled form and order summary
//! POST /checkout               - Place order
//! GET  /order-confirmation     - Most recent order
//!
//! # Auth (rate limited)
//! POST /login                  - Login action
//! POST /register               - Register action
//! POST /newsletter             - Newsletter signup
//!
//! POST /logout                 - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Account overview
//!
//! # Admin (requires admin role)
//! GET  /admin                  - Dashboard and inventory (?q=)
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod newsletter;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/shop", get(products::index))
        .route("/categories", get(products::categories))
        .route("/category/{category}", get(products::category))
        .route("/product/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/coupon", post(cart::apply_coupon))
}

/// Routes that accept credentials or email addresses.
///
/// Kept separate so the rate limiter can wrap them alone.
pub fn limited_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/newsletter", post(newsletter::subscribe))
}

/// Create all unlimited routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route("/order-confirmation", get(checkout::confirmation))
        .route("/logout", post(auth::logout))
        .route("/account", get(account::index))
        .route("/admin", get(admin::index))
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
