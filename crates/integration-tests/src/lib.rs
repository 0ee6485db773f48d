//! Integration tests for Parcel.
//!
//! The tests drive the storefront router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p parcel-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Home, shop listing and product pages
//! - `cart` - Cart mutations, stock limits and coupons
//! - `auth` - Sign-in, registration, account and admin gating
//! - `checkout` - Checkout validation and order placement

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use parcel_core::Catalog;
use parcel_storefront::config::StorefrontConfig;
use parcel_storefront::middleware::session::SESSION_COOKIE_NAME;
use parcel_storefront::services::auth::DemoAuthProvider;
use parcel_storefront::services::payment::MockPaymentGateway;
use parcel_storefront::state::AppState;

/// Storefront config for tests: no latency, no rate limiting.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        auth_latency: Duration::ZERO,
        payment_latency: Duration::ZERO,
        rate_limit: false,
        ..StorefrontConfig::default()
    }
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// JSON body, or `Value::Null` if the body is not JSON.
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of a JSON error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// A browser-like client: keeps the session cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// A client for a fresh storefront with the built-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if the storefront state cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::new(test_config()).expect("test state builds");
        Self::with_app(parcel_storefront::app(state))
    }

    /// A client for a fresh storefront selling `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let config = test_config();
        let auth = Arc::new(DemoAuthProvider::with_demo_accounts(config.auth_latency));
        let payments = Arc::new(MockPaymentGateway::new(config.payment_latency));
        let state = AppState::with_services(config, catalog, auth, payments);
        Self::with_app(parcel_storefront::app(state))
    }

    /// A client for an existing router. Clients built from clones of one
    /// router share its session store.
    #[must_use]
    pub const fn with_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Forget the session cookie, like a new browser.
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    /// Sign in with a demo account.
    ///
    /// # Panics
    ///
    /// Panics if sign-in fails.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        let response = self
            .post(
                "/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {response:?}");
        response
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = session_cookie(response.headers()) {
            self.cookie = Some(cookie);
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `name=value` of the session cookie set by a response, if any.
fn session_cookie(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(String::from)
}

/// Product ids of a JSON array of products.
#[must_use]
pub fn product_ids(products: &Value) -> Vec<String> {
    products
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p.get("id").and_then(Value::as_str))
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
