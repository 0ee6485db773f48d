//! Integration tests for checkout and order confirmation.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use parcel_core::Catalog;
use parcel_core::order::OrderNumber;
use parcel_integration_tests::TestClient;

fn filled_form() -> Value {
    json!({
        "first_name": "Test",
        "last_name": "User",
        "email": "user@example.com",
        "phone": "555-0100",
        "address": "1 Main St",
        "city": "Springfield",
        "state": "IL",
        "zip_code": "62701",
        "country": "United States",
        "shipping_method": "express",
        "payment_method": "paypal",
        "same_billing_address": true,
    })
}

#[tokio::test]
async fn test_checkout_page_prefills_signed_in_user() {
    let mut client = TestClient::new();
    client.login("admin@example.com", "admin123").await;

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["form"]["first_name"], "Admin");
    assert_eq!(response.body["form"]["last_name"], "User");
    assert_eq!(response.body["form"]["email"], "admin@example.com");
    assert_eq!(response.body["form"]["country"], "United States");
    assert_eq!(response.body["shipping_options"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_checkout_summary_uses_selected_shipping() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "9" })).await;

    let response = client.get("/checkout?shipping_method=next-day").await;
    assert_eq!(response.body["summary"]["shipping"]["amount"], "25.00");
    assert_eq!(response.body["summary"]["total"]["amount"], "54.99");
}

#[tokio::test]
async fn test_checkout_with_empty_cart() {
    let response = TestClient::new().post("/checkout", filled_form()).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Your cart is empty"));
}

#[tokio::test]
async fn test_checkout_reports_first_missing_field() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "1" })).await;

    let mut form = filled_form();
    form["zip_code"] = json!("");
    form["city"] = json!("  ");
    let response = client.post("/checkout", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Please fill in the city field"));

    // Nothing was charged or cleared
    assert_eq!(client.get("/cart/count").await.body["count"], 1);
}

#[tokio::test]
async fn test_checkout_rejects_malformed_email() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "1" })).await;

    let mut form = filled_form();
    form["email"] = json!("not-an-email");
    let response = client.post("/checkout", form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response
            .error()
            .unwrap()
            .starts_with("Please enter a valid email address")
    );
}

#[tokio::test]
async fn test_confirmation_without_order_is_not_found() {
    let response = TestClient::new().get("/order-confirmation").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_place_order() {
    let mut client = TestClient::new();
    client
        .post("/cart/add", json!({ "product_id": "9", "quantity": 2 }))
        .await;
    client.post("/cart/coupon", json!({ "code": "DISCOUNT20" })).await;

    let response = client.post("/checkout", filled_form()).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body["message"],
        "Your order has been placed successfully!"
    );

    let order = &response.body["order"];
    // 59.98 - 12.00 + 15.00
    assert_eq!(order["summary"]["subtotal"]["amount"], "59.98");
    assert_eq!(order["summary"]["discount"]["amount"], "12.00");
    assert_eq!(order["summary"]["total"]["amount"], "62.98");
    assert_eq!(order["shipping_method"], "express");
    assert_eq!(order["payment_method"], "paypal");
    assert!(order["payment_reference"].as_str().unwrap().starts_with("pay_"));
    order["number"]
        .as_str()
        .unwrap()
        .parse::<OrderNumber>()
        .unwrap();

    // Cart and coupon are cleared
    let cart = client.get("/cart").await;
    assert_eq!(cart.body["total_items"], 0);
    assert!(cart.body["coupon"].is_null());

    // The confirmation page shows the same order
    let confirmation = client.get("/order-confirmation").await;
    assert_eq!(confirmation.status, StatusCode::OK);
    assert_eq!(confirmation.body["number"], order["number"]);
}

#[tokio::test]
async fn test_placed_order_appears_in_account() {
    let mut client = TestClient::new();
    client.login("user@example.com", "user123").await;
    client.post("/cart/add", json!({ "product_id": "5" })).await;

    let placed = client.post("/checkout", filled_form()).await;
    assert_eq!(placed.status, StatusCode::CREATED);

    let account = client.get("/account").await;
    assert_eq!(account.body["orders"][0]["number"], placed.body["order"]["number"]);
    assert_eq!(account.body["orders"][0]["status"], "Processing");
    assert_eq!(account.body["orders"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_free_order_with_standard_shipping() {
    let catalog = Catalog::from_json(
        r#"[{
            "id": "sample",
            "name": "Free Sample",
            "description": "A free tea sample",
            "price": {"amount": "0.00"},
            "image": "https://example.com/sample.jpg",
            "category": "food",
            "rating": "4.0",
            "stock": 5
        }]"#,
    )
    .unwrap();
    let mut client = TestClient::with_catalog(catalog);
    client.post("/cart/add", json!({ "product_id": "sample" })).await;

    let mut form = filled_form();
    form["shipping_method"] = json!("standard");
    let response = client.post("/checkout", form).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["order"]["summary"]["total"]["amount"], "0.00");
}
