//! Integration tests for lazy pagination over list endpoints.
//!
//! These tests run against a local mock server and count the requests the
//! paginator issues as items are pulled.

use std::sync::Arc;

use printify_api::clients::{HttpClient, Paginator, ProtocolError};
use printify_api::resources::{Product, ProductListParams};
use printify_api::{ApiToken, BaseUrl, Printify, PrintifyConfig, PrintifyError, ShopId};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCTS_PATH: &str = "/v1/shops/S1/products.json";

/// Creates a facade pointed at the mock server with default shop `S1`.
fn create_test_printify(server: &MockServer) -> Printify {
    let config = PrintifyConfig::builder()
        .api_token(ApiToken::new("test-token").unwrap())
        .shop_id(ShopId::new("S1").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Printify::with_config(config).unwrap()
}

fn product_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "blueprint_id": 6,
        "print_provider_id": 1,
        "shop_id": 5432,
        "variants": [{"id": 12100, "price": 1999, "is_enabled": true}]
    })
}

fn page_json(page: u64, last_page: u64, ids: &[&str]) -> Value {
    let next_page_url = if page < last_page {
        Value::String(format!("{PRODUCTS_PATH}?page={}", page + 1))
    } else {
        Value::Null
    };
    json!({
        "current_page": page,
        "last_page": last_page,
        "next_page_url": next_page_url,
        "data": ids.iter().map(|id| product_json(id)).collect::<Vec<_>>()
    })
}

async fn mount_page(server: &MockServer, page: u64, body: Value) {
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |requests| requests.len())
}

// ============================================================================
// Lazy Fetching
// ============================================================================

#[tokio::test]
async fn test_pages_are_fetched_only_when_pulled() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_json(1, 3, &["a", "b"])).await;
    mount_page(&server, 2, page_json(2, 3, &["c", "d"])).await;
    mount_page(&server, 3, page_json(3, 3, &["e"])).await;

    let printify = create_test_printify(&server);
    let mut products = printify
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    // Nothing is requested before the first pull
    assert_eq!(request_count(&server).await, 0);

    let first = products.next_item().await.unwrap().unwrap();
    assert_eq!(first.id, "a");
    assert_eq!(request_count(&server).await, 1);

    products.next_item().await.unwrap();
    products.next_item().await.unwrap();
    assert_eq!(request_count(&server).await, 2);

    let rest = products.try_collect().await.unwrap();
    let ids: Vec<&str> = rest.iter().map(|product| product.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "e"]);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_full_walk_yields_every_item_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_json(1, 3, &["a", "b"])).await;
    mount_page(&server, 2, page_json(2, 3, &["c", "d"])).await;
    mount_page(&server, 3, page_json(3, 3, &["e"])).await;

    let products: Vec<Product> = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<&str> = products.iter().map(|product| product.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(products[0].shop_id, "5432");
}

#[tokio::test]
async fn test_next_page_returns_whole_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_json(1, 2, &["a", "b"])).await;
    mount_page(&server, 2, page_json(2, 2, &["c"])).await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert_eq!(products.next_page().await.unwrap().unwrap().len(), 2);
    assert_eq!(products.next_page().await.unwrap().unwrap().len(), 1);
    assert!(products.next_page().await.unwrap().is_none());
    assert_eq!(products.pages_fetched(), 2);
}

#[tokio::test]
async fn test_empty_collection_makes_one_request() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_json(1, 1, &[])).await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert!(products.next_item().await.unwrap().is_none());
    assert!(products.next_item().await.unwrap().is_none());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_walk_starts_at_requested_page() {
    let server = MockServer::start().await;
    mount_page(&server, 2, page_json(2, 2, &["c"])).await;

    let params = ProductListParams {
        limit: Some(2),
        page: Some(2),
    };
    let products = create_test_printify(&server)
        .products()
        .list(&params)
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .any(|(key, value)| key == "limit" && value == "2"));
}

#[tokio::test]
async fn test_max_pages_stops_the_walk() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_json(1, 3, &["a", "b"])).await;
    mount_page(&server, 2, page_json(2, 3, &["c", "d"])).await;

    let products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap()
        .max_pages(2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(products.len(), 4);
    assert_eq!(request_count(&server).await, 2);
}

// ============================================================================
// Next-Page Indicators
// ============================================================================

#[tokio::test]
async fn test_last_page_is_used_without_next_page_url() {
    let server = MockServer::start().await;
    for (page, id) in [(1_u64, "a"), (2, "b")] {
        mount_page(
            &server,
            page,
            json!({"current_page": page, "last_page": 2, "data": [product_json(id)]}),
        )
        .await;
    }

    let products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_empty_next_page_url_ends_walk() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"current_page": 1, "last_page": 5, "next_page_url": "", "data": [product_json("a")]}),
    )
    .await;

    let products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_raw_paginator_over_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/uploads.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_page": 1,
            "last_page": 1,
            "data": [{"id": "img1", "file_name": "cat.png"}]
        })))
        .mount(&server)
        .await;

    let client: Arc<HttpClient> = create_test_printify(&server).http_client();
    let items = Paginator::new(client, "uploads.json", None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": "img1", "file_name": "cat.png"})]);
}

// ============================================================================
// Protocol Errors
// ============================================================================

#[tokio::test]
async fn test_repeated_page_is_reported_after_earlier_items() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"next_page_url": "?page=2", "data": [product_json("a")]}),
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"next_page_url": "?page=1", "data": [product_json("b")]}),
    )
    .await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert_eq!(products.next_item().await.unwrap().unwrap().id, "a");
    assert_eq!(products.next_item().await.unwrap().unwrap().id, "b");

    let error = products.next_item().await.unwrap_err();
    assert!(matches!(
        error,
        PrintifyError::Protocol(ProtocolError::RepeatedPage { page: 1, .. })
    ));
    assert_eq!(request_count(&server).await, 2);

    // The walk is over after the error
    assert!(products.next_item().await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_data_is_malformed_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({"current_page": 1, "last_page": 1})).await;

    let error = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap()
        .try_collect()
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        PrintifyError::Protocol(ProtocolError::MalformedPage { .. })
    ));
}

#[tokio::test]
async fn test_unparseable_next_page_url_is_malformed_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"next_page_url": "/v1/shops/S1/products.json", "data": [product_json("a")]}),
    )
    .await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    let error = products.next_item().await.unwrap_err();
    assert!(matches!(
        error,
        PrintifyError::Protocol(ProtocolError::MalformedPage { .. })
    ));

    // Items of the rejected page are not delivered afterwards
    assert!(products.next_item().await.unwrap().is_none());
}

#[tokio::test]
async fn test_failing_page_surfaces_server_error() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_json(1, 2, &["a"])).await;
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .mount(&server)
        .await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert!(products.next_item().await.unwrap().is_some());
    let error = products.next_item().await.unwrap_err();
    assert_eq!(error.status(), Some(503));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_invalid_item_is_validation_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"next_page_url": null, "data": [{"id": "a", "title": "no blueprint"}]}),
    )
    .await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert!(matches!(
        products.next_item().await,
        Err(PrintifyError::Validation(_))
    ));
}

#[tokio::test]
async fn test_invalid_item_ends_the_walk() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"next_page_url": "?page=2", "data": [{"id": "bad"}, product_json("b")]}),
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"next_page_url": null, "data": [product_json("c")]}),
    )
    .await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert!(matches!(
        products.next_item().await,
        Err(PrintifyError::Validation(_))
    ));
    assert!(products.next_item().await.unwrap().is_none());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_invalid_item_in_next_page_ends_the_walk() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        json!({"next_page_url": "?page=2", "data": [product_json("a"), {"id": "bad"}]}),
    )
    .await;
    mount_page(
        &server,
        2,
        json!({"next_page_url": null, "data": [product_json("c")]}),
    )
    .await;

    let mut products = create_test_printify(&server)
        .products()
        .list(&ProductListParams::default())
        .unwrap();

    assert!(matches!(
        products.next_page().await,
        Err(PrintifyError::Validation(_))
    ));
    assert!(products.next_page().await.unwrap().is_none());
    assert_eq!(request_count(&server).await, 1);
}
