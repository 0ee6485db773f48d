//! Integration tests for the home page, shop listing and product pages.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use parcel_integration_tests::{TestClient, product_ids};

#[tokio::test]
async fn test_health() {
    let response = TestClient::new().get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_home_shows_first_four_featured() {
    let response = TestClient::new().get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(product_ids(&response.body["featured"]), ["1", "2", "4", "7"]);
    assert!(response.body["greeting"].is_null());
    assert_eq!(response.body["features"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_home_greets_signed_in_user() {
    let mut client = TestClient::new();
    client.login("user@example.com", "user123").await;

    let response = client.get("/").await;
    assert_eq!(response.body["greeting"], "Welcome back, Test!");
}

#[tokio::test]
async fn test_categories_sorted_and_distinct() {
    let response = TestClient::new().get("/categories").await;
    assert_eq!(
        response.body,
        serde_json::json!(["electronics", "fashion", "fitness", "food", "home", "lifestyle"])
    );
}

#[tokio::test]
async fn test_category_page_is_exact_match() {
    let mut client = TestClient::new();

    let response = client.get("/category/home").await;
    assert_eq!(product_ids(&response.body), ["5", "10", "11", "12"]);

    let response = client.get("/category/Home").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(product_ids(&response.body).is_empty());
}

#[tokio::test]
async fn test_shop_default_sort_puts_featured_first() {
    let response = TestClient::new().get("/shop").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 12);
    assert_eq!(response.body["sort"], "featured");
    assert_eq!(
        product_ids(&response.body["products"]),
        ["1", "2", "4", "7", "12", "3", "5", "6", "8", "9", "10", "11"]
    );
}

#[tokio::test]
async fn test_shop_filters_combine() {
    let response = TestClient::new()
        .get("/shop?category=home,electronics&min_price=30&max_price=80&sort=price-asc")
        .await;

    // 39.99 (5), 42.99 (10), 64.99 (12), 79.99 (11)
    assert_eq!(product_ids(&response.body["products"]), ["5", "10", "12", "11"]);
}

#[tokio::test]
async fn test_shop_search_matches_description_case_insensitively() {
    let response = TestClient::new().get("/shop?q=COFFEE").await;
    assert_eq!(product_ids(&response.body["products"]), ["7"]);
}

#[tokio::test]
async fn test_shop_unknown_sort_falls_back_to_featured() {
    let response = TestClient::new().get("/shop?sort=cheapest-first").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sort"], "featured");
}

#[tokio::test]
async fn test_shop_rejects_non_numeric_price() {
    let response = TestClient::new().get("/shop?min_price=cheap").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_detail_with_related() {
    let response = TestClient::new().get("/product/1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["product"]["name"], "Premium Wireless Headphones");
    assert_eq!(response.body["product"]["price_display"], "$249.99");
    assert_eq!(product_ids(&response.body["related"]), ["2", "3", "9"]);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let response = TestClient::new().get("/product/999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("Product not found"));
}

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let response = TestClient::new().get("/no/such/page").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), Some("Page not found"));
}
