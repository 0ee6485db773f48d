//! Integration tests for the session cart.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use parcel_integration_tests::TestClient;

#[tokio::test]
async fn test_new_visitor_has_empty_cart() {
    let mut client = TestClient::new();

    let response = client.get("/cart").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["items"], json!([]));
    assert_eq!(response.body["total_items"], 0);

    let response = client.get("/cart/count").await;
    assert_eq!(response.body["count"], 0);
}

#[tokio::test]
async fn test_repeated_adds_merge_into_one_line() {
    let mut client = TestClient::new();
    for _ in 0..3 {
        let response = client.post("/cart/add", json!({ "product_id": "1" })).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = client.get("/cart").await;
    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["line_total"]["amount"], "749.97");
    assert_eq!(response.body["total_items"], 3);
}

#[tokio::test]
async fn test_totals_and_free_shipping() {
    let mut client = TestClient::new();
    client
        .post("/cart/add", json!({ "product_id": "9", "quantity": 1 }))
        .await;

    // 29.99 is under the free shipping threshold
    let response = client.get("/cart").await;
    assert_eq!(response.body["summary"]["subtotal"]["amount"], "29.99");
    assert_eq!(response.body["summary"]["shipping"]["amount"], "5");
    assert_eq!(response.body["summary"]["total"]["amount"], "34.99");

    client
        .post("/cart/add", json!({ "product_id": "5", "quantity": 1 }))
        .await;
    let response = client.get("/cart").await;
    assert_eq!(response.body["summary"]["subtotal"]["amount"], "69.98");
    assert_eq!(response.body["summary"]["shipping"]["amount"], "0");
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "2" })).await;
    client.post("/cart/add", json!({ "product_id": "4" })).await;

    let response = client
        .post("/cart/update", json!({ "product_id": "2", "quantity": 0 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "4");
}

#[tokio::test]
async fn test_update_sets_quantity() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "6" })).await;

    let response = client
        .post("/cart/update", json!({ "product_id": "6", "quantity": 4 }))
        .await;
    assert_eq!(response.body["total_items"], 4);
}

#[tokio::test]
async fn test_remove_absent_item_is_noop() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "3" })).await;

    let response = client
        .post("/cart/remove", json!({ "product_id": "11" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_items"], 1);

    let response = client.post("/cart/remove", json!({ "product_id": "3" })).await;
    assert_eq!(response.body["total_items"], 0);
}

#[tokio::test]
async fn test_add_beyond_stock_is_rejected() {
    let mut client = TestClient::new();

    // Product 12 has 7 units
    let response = client
        .post("/cart/add", json!({ "product_id": "12", "quantity": 7 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = client.post("/cart/add", json!({ "product_id": "12" })).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.error().unwrap().contains("in stock"));

    let response = client.get("/cart/count").await;
    assert_eq!(response.body["count"], 7);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let response = TestClient::new()
        .post("/cart/add", json!({ "product_id": "404" }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_zero_quantity_is_bad_request() {
    let response = TestClient::new()
        .post("/cart/add", json!({ "product_id": "1", "quantity": 0 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_coupon_codes() {
    let mut client = TestClient::new();
    client
        .post("/cart/add", json!({ "product_id": "1", "quantity": 2 }))
        .await;

    let response = client.post("/cart/coupon", json!({ "code": "" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), Some("Please enter a coupon code"));

    let response = client.post("/cart/coupon", json!({ "code": "FREESTUFF" })).await;
    assert_eq!(response.error(), Some("Invalid coupon code"));

    let response = client.post("/cart/coupon", json!({ "code": "discount20" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Coupon applied successfully!");

    let response = client.get("/cart").await;
    assert_eq!(response.body["coupon"], "DISCOUNT20");
    assert_eq!(response.body["summary"]["subtotal"]["amount"], "499.98");
    assert_eq!(response.body["summary"]["discount"]["amount"], "100.00");
    assert_eq!(response.body["summary"]["total"]["amount"], "399.98");
}

#[tokio::test]
async fn test_clear_empties_cart_and_coupon() {
    let mut client = TestClient::new();
    client.post("/cart/add", json!({ "product_id": "8" })).await;
    client.post("/cart/coupon", json!({ "code": "DISCOUNT20" })).await;

    let response = client.post_empty("/cart/clear").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = client.get("/cart").await;
    assert_eq!(response.body["total_items"], 0);
    assert!(response.body["coupon"].is_null());
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let app = parcel_storefront::app(
        parcel_storefront::state::AppState::new(parcel_integration_tests::test_config()).unwrap(),
    );
    let mut alice = TestClient::with_app(app.clone());
    let mut bob = TestClient::with_app(app);

    alice.post("/cart/add", json!({ "product_id": "1" })).await;

    assert_eq!(alice.get("/cart/count").await.body["count"], 1);
    assert_eq!(bob.get("/cart/count").await.body["count"], 0);
}
