//! CRUD integration tests.
//!
//! Tests verify:
//! - Create then fetch returns the submitted fields plus an id
//! - Validation failures leave the store untouched
//! - Updates merge, deletes remove, missing ids yield 404

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::test_utils::{
    body_json, body_text, delete, get, post_json, put_json, seeded_router, TEST_API_KEY,
};

// =============================================================================
// Root and Fallback
// =============================================================================

#[tokio::test]
async fn test_root_greeting() {
    let (router, _) = seeded_router();

    let response = router.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(
        body_text(response).await,
        "Hello World from the Product Catalog API!"
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (router, _) = seeded_router();

    let response = router.oneshot(get("/api/orders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_get_product_by_id() {
    let (router, _) = seeded_router();

    let response = router.oneshot(get("/api/products/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "id": 3,
            "name": "Royal Jelly",
            "description": "Nutrient-rich bee secretion",
            "price": 25.0,
            "category": "Health",
            "inStock": true
        })
    );
}

#[tokio::test]
async fn test_get_missing_product() {
    let (router, _) = seeded_router();

    let response = router.oneshot(get("/api/products/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "status": "error", "message": "Product not found" })
    );
}

#[tokio::test]
async fn test_get_non_numeric_id_is_not_found() {
    let (router, _) = seeded_router();

    let response = router.oneshot(get("/api/products/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_id_with_trailing_text() {
    let (router, _) = seeded_router();

    // Leading digits are what counts, so "2x" resolves to product 2
    let response = router.oneshot(get("/api/products/2x")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Beeswax Candle");
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_then_fetch() {
    let (router, state) = seeded_router();
    let input = json!({
        "name": "Mead",
        "description": "Honey wine",
        "price": 30.5,
        "category": "Food",
        "inStock": true
    });

    let response = router
        .clone()
        .oneshot(post_json("/api/products", input.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let id = created["id"].as_u64().unwrap();
    assert!(id > 5);

    let mut expected = input;
    expected["id"] = json!(id);
    assert_eq!(created, expected);

    let response = router
        .oneshot(get(&format!("/api/products/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, expected);

    assert_eq!(state.store.read().await.len(), 6);
}

#[tokio::test]
async fn test_create_without_stock_flag() {
    let (router, _) = seeded_router();

    let response = router
        .oneshot(post_json(
            "/api/products",
            json!({ "name": "Wax", "description": "Block", "price": 4, "category": "Home" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert!(created.get("inStock").is_none());
}

#[tokio::test]
async fn test_create_missing_price_rejected() {
    let (router, state) = seeded_router();

    let response = router
        .oneshot(post_json(
            "/api/products",
            json!({ "name": "Wax", "description": "Block", "category": "Home" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "status": "error", "message": "Missing required fields" })
    );
    assert_eq!(state.store.read().await.len(), 5);
}

#[tokio::test]
async fn test_create_empty_name_rejected() {
    let (router, state) = seeded_router();

    let response = router
        .oneshot(post_json(
            "/api/products",
            json!({ "name": "", "description": "Block", "price": 4, "category": "Home" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.store.read().await.len(), 5);
}

#[tokio::test]
async fn test_create_malformed_body_rejected() {
    let (router, state) = seeded_router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("x-api-key", TEST_API_KEY)
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "error");
    assert_eq!(state.store.read().await.len(), 5);
}

#[tokio::test]
async fn test_create_wrong_field_type_rejected() {
    let (router, _) = seeded_router();

    let response = router
        .oneshot(post_json(
            "/api/products",
            json!({ "name": "Wax", "description": "Block", "price": "cheap", "category": "Home" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_merges_supplied_fields() {
    let (router, _) = seeded_router();

    let response = router
        .clone()
        .oneshot(put_json(
            "/api/products/1",
            json!({ "price": 11.5, "inStock": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["price"], 11.5);
    assert_eq!(updated["inStock"], false);
    assert_eq!(updated["name"], "Honey Jar");
    assert_eq!(updated["description"], "Pure organic honey");
    assert_eq!(updated["category"], "Food");

    let response = router.oneshot(get("/api/products/1")).await.unwrap();
    assert_eq!(body_json(response).await, updated);
}

#[tokio::test]
async fn test_update_cannot_change_id() {
    let (router, state) = seeded_router();

    let response = router
        .oneshot(put_json("/api/products/1", json!({ "id": 2, "name": "Renamed" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], 1);

    let store = state.store.read().await;
    assert_eq!(store.get(1).unwrap().name, "Renamed");
    assert_eq!(store.get(2).unwrap().name, "Beeswax Candle");
}

#[tokio::test]
async fn test_update_missing_product() {
    let (router, _) = seeded_router();

    let response = router
        .oneshot(put_json("/api/products/999", json!({ "price": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Product not found");
}

fn put_raw(uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("x-api-key", TEST_API_KEY);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn test_update_without_body() {
    let (router, state) = seeded_router();
    let before = state.store.read().await.get(1).cloned().unwrap();

    let response = router
        .clone()
        .oneshot(put_raw("/api/products/999", None, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Product not found");

    let response = router
        .oneshot(put_raw("/api/products/1", None, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Honey Jar");
    assert_eq!(state.store.read().await.get(1), Some(&before));
}

#[tokio::test]
async fn test_update_ignores_non_json_body() {
    let (router, state) = seeded_router();

    let response = router
        .oneshot(put_raw(
            "/api/products/1",
            Some("text/plain"),
            r#"{"name":"Renamed"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.store.read().await.get(1).unwrap().name, "Honey Jar");
}

#[tokio::test]
async fn test_update_empty_json_body_for_missing_product() {
    let (router, _) = seeded_router();

    let response = router
        .oneshot(put_raw("/api/products/999", Some("application/json"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_malformed_body_rejected() {
    let (router, state) = seeded_router();

    let response = router
        .oneshot(put_raw(
            "/api/products/1",
            Some("application/json"),
            "{ not json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "error");
    assert_eq!(state.store.read().await.get(1).unwrap().name, "Honey Jar");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_fetch() {
    let (router, state) = seeded_router();

    let response = router
        .clone()
        .oneshot(delete("/api/products/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Product deleted successfully" })
    );

    let response = router.oneshot(get("/api/products/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(state.store.read().await.len(), 4);
}

#[tokio::test]
async fn test_delete_missing_product() {
    let (router, state) = seeded_router();

    let response = router.oneshot(delete("/api/products/77")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.store.read().await.len(), 5);
}

#[tokio::test]
async fn test_create_with_exhausted_ids_is_masked_500() {
    use product_catalog::{create_router, AppState, Product, ProductStore, RouterConfig};

    let store = ProductStore::with_products(vec![Product {
        id: u64::MAX,
        name: "Last".to_string(),
        description: "Final id".to_string(),
        price: 1.0,
        category: "Misc".to_string(),
        in_stock: None,
    }]);
    let state = AppState::new(store);
    let router = create_router(
        state.clone(),
        RouterConfig::new(TEST_API_KEY).with_request_logging(false),
    );

    let response = router
        .oneshot(post_json(
            "/api/products",
            json!({ "name": "Wax", "description": "Block", "price": 4, "category": "Home" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "error", "message": "Internal Server Error" })
    );
    assert_eq!(state.store.read().await.len(), 1);
}

#[tokio::test]
async fn test_router_with_request_logging() {
    use product_catalog::{create_router, AppState, RouterConfig};

    let router = create_router(AppState::seeded(), RouterConfig::new(TEST_API_KEY));

    let response = router.oneshot(get("/api/products/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Honey Jar");
}
