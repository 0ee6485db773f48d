//! Integration tests for sign-in, registration, account and admin gating.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use parcel_integration_tests::TestClient;

#[tokio::test]
async fn test_login_with_demo_customer() {
    let mut client = TestClient::new();
    let response = client.login("user@example.com", "user123").await;

    assert_eq!(response.body["message"], "Welcome back, Test User!");
    assert_eq!(response.body["user"]["id"], "2");
    assert_eq!(response.body["user"]["role"], "customer");
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let response = TestClient::new()
        .post(
            "/login",
            json!({ "email": "admin@example.com", "password": "hunter2" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), Some("Invalid email or password"));
}

#[tokio::test]
async fn test_account_requires_sign_in() {
    let mut client = TestClient::new();
    assert_eq!(client.get("/account").await.status, StatusCode::UNAUTHORIZED);

    client.login("user@example.com", "user123").await;
    let response = client.get("/account").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], "user@example.com");
    assert_eq!(response.body["first_name"], "Test");
    assert_eq!(response.body["last_name"], "User");
    assert_eq!(response.body["orders"][0]["number"], "ORD-4389-2023");
}

#[tokio::test]
async fn test_admin_requires_admin_role() {
    let mut client = TestClient::new();
    assert_eq!(client.get("/admin").await.status, StatusCode::UNAUTHORIZED);

    client.login("user@example.com", "user123").await;
    assert_eq!(client.get("/admin").await.status, StatusCode::FORBIDDEN);

    let mut admin = TestClient::new();
    admin.login("admin@example.com", "admin123").await;
    let response = admin.get("/admin").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["inventory"].as_array().unwrap().len(), 12);
    assert_eq!(response.body["category_counts"]["home"], 4);
    assert_eq!(response.body["dashboard"]["stats"][0]["value"], "$12,890");
}

#[tokio::test]
async fn test_admin_inventory_search_and_stock_status() {
    let mut admin = TestClient::new();
    admin.login("admin@example.com", "admin123").await;

    let response = admin.get("/admin?q=candle").await;
    let rows = response.body["inventory"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "12");
    assert_eq!(rows[0]["status"], "low");

    let response = admin.get("/admin?q=HEADPHONES").await;
    assert_eq!(response.body["inventory"][0]["status"], "in-stock");
}

#[tokio::test]
async fn test_logout_signs_out_but_keeps_cart() {
    let mut client = TestClient::new();
    client.login("admin@example.com", "admin123").await;
    client.post("/cart/add", json!({ "product_id": "1" })).await;

    let response = client.post_empty("/logout").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "You have been logged out");

    assert_eq!(client.get("/account").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(client.get("/cart/count").await.body["count"], 1);
}

#[tokio::test]
async fn test_sign_in_is_per_visitor() {
    let mut client = TestClient::new();
    client.login("user@example.com", "user123").await;

    client.clear_cookies();
    assert_eq!(client.get("/account").await.status, StatusCode::UNAUTHORIZED);
}

fn registration(email: &str) -> serde_json::Value {
    json!({
        "name": "New Customer",
        "email": email,
        "password": "s3cret!",
        "confirm_password": "s3cret!",
        "accept_terms": true,
    })
}

#[tokio::test]
async fn test_register_new_email() {
    let mut client = TestClient::new();
    let response = client.post("/register", registration("new@example.com")).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body["message"],
        "Registration successful! Please log in."
    );
    // Registration does not sign the visitor in
    assert_eq!(client.get("/account").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_existing_email() {
    let response = TestClient::new()
        .post("/register", registration("admin@example.com"))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error(), Some("Email already in use"));
}

#[tokio::test]
async fn test_register_validation() {
    let mut client = TestClient::new();

    let mut form = registration("new@example.com");
    form["confirm_password"] = json!("different");
    let response = client.post("/register", form).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Passwords do not match"));

    let mut form = registration("new@example.com");
    form["accept_terms"] = json!(false);
    let response = client.post("/register", form).await;
    assert_eq!(
        response.error(),
        Some("Please accept the terms and privacy policy")
    );
}

#[tokio::test]
async fn test_newsletter() {
    let mut client = TestClient::new();

    let response = client.post("/newsletter", json!({ "email": " " })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Please enter your email address"));

    let response = client
        .post("/newsletter", json!({ "email": "reader@example.com" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Thank you for subscribing to our newsletter!"
    );
}
