//! Integration tests for `RemoteCatalogClient` against a local Shopify stand-in.
//!
//! Each test starts its own `wiremock` server and points the shop URL at it,
//! so request paths, headers and query parameters are checked on the wire.

use std::collections::BTreeSet;

use serde_json::json;
use wiremock::matchers::{header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopify_catalog::clients::ACCESS_TOKEN_HEADER;
use shopify_catalog::{
    ApiVersion, CatalogConfig, CatalogError, CatalogSource, PaginationWalker,
    RemoteCatalogClient,
};

const PRODUCTS_PATH: &str = "/admin/api/2023-04/products.json";

fn client_for(server: &MockServer) -> RemoteCatalogClient {
    let config = CatalogConfig::builder()
        .shop_url(server.uri())
        .access_token("shpat_test_token")
        .build()
        .unwrap();
    RemoteCatalogClient::new(config).unwrap()
}

fn page_body(ids: &[u64]) -> serde_json::Value {
    json!({
        "products": ids.iter().map(|id| json!({"id": id, "title": format!("Product {id}")})).collect::<Vec<_>>()
    })
}

fn next_link(server: &MockServer, cursor: &str) -> String {
    format!(
        "<{}{PRODUCTS_PATH}?limit=50&page_info={cursor}>; rel=\"next\"",
        server.uri()
    )
}

// ============================================================================
// Headers and paths
// ============================================================================

#[tokio::test]
async fn test_requests_carry_token_and_json_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(header(ACCESS_TOKEN_HEADER, "shpat_test_token"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header_regex("User-Agent", r"Shopify Catalog Library v\d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1])))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).list_products(None).await.unwrap();

    assert_eq!(page.products.len(), 1);
    assert!(page.next_page_url.is_none());
}

#[tokio::test]
async fn test_api_version_selects_base_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2024-10/products/42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"product": {"id": 42}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = CatalogConfig::builder()
        .shop_url(server.uri())
        .access_token("token")
        .api_version(ApiVersion::V2024_10)
        .build()
        .unwrap();
    let raw = RemoteCatalogClient::new(config)
        .unwrap()
        .get_product(42)
        .await
        .unwrap();

    assert_eq!(raw.id(), Some(42));
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_walk_follows_link_header_exactly_n_times() {
    let server = MockServer::start().await;

    // Cursor pages are mounted first so they win over the bare listing mock.
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page_info", "cursor3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[5])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page_info", "cursor2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[3, 4]))
                .insert_header("Link", next_link(&server, "cursor3").as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[1, 2]))
                .insert_header("Link", next_link(&server, "cursor2").as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let products = PaginationWalker::new(&client, None)
        .collect_all()
        .await
        .unwrap();

    let ids: Vec<u64> = products.iter().filter_map(|p| p.id()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_next_page_url_is_requested_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("limit", "50"))
        .and(query_param("page_info", "opaque-cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[9])))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}{PRODUCTS_PATH}?limit=50&page_info=opaque-cursor", server.uri());
    let page = client_for(&server)
        .list_products(Some(&url))
        .await
        .unwrap();

    assert_eq!(page.products[0].id(), Some(9));
}

#[tokio::test]
async fn test_page_limit_stops_the_walk() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[1]))
                .insert_header("Link", next_link(&server, "again").as_str()),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = PaginationWalker::new(&client, Some(2))
        .collect_all()
        .await
        .unwrap_err();

    assert!(matches!(error, CatalogError::PageLimitExceeded { max_pages: 2 }));
}

// ============================================================================
// Inventory and handle lookup
// ============================================================================

#[tokio::test]
async fn test_inventory_levels_send_comma_separated_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-04/inventory_levels.json"))
        .and(query_param("inventory_item_ids", "100,200,300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "inventory_levels": [
                {"inventory_item_id": 100, "location_id": 1, "available": 3},
                {"inventory_item_id": 100, "location_id": 2, "available": 4},
                {"inventory_item_id": 200, "location_id": 1, "available": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let levels = client_for(&server)
        .inventory_levels(&BTreeSet::from([300, 100, 200]))
        .await
        .unwrap();

    assert_eq!(levels.quantity(100), 7);
    assert_eq!(levels.quantity(200), 0);
    assert_eq!(levels.quantity(300), 0);
}

#[tokio::test]
async fn test_handle_lookup_returns_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("handle", "blue-denim-jacket"))
        .and(query_param("fields", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [{"id": 8675309}]})))
        .expect(1)
        .mount(&server)
        .await;

    let id = client_for(&server)
        .find_product_id_by_handle("blue-denim-jacket")
        .await
        .unwrap();

    assert_eq!(id, Some(8675309));
}

#[tokio::test]
async fn test_handle_lookup_with_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("handle", "missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let id = client_for(&server)
        .find_product_id_by_handle("missing")
        .await
        .unwrap();

    assert!(id.is_none());
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_non_success_status_is_forwarded_with_endpoint_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-04/products/1.json"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"errors": "Not Found"}))
                .insert_header("X-Request-Id", "req-404"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).get_product(1).await.unwrap_err();

    match error {
        CatalogError::Upstream {
            status,
            message,
            request_id,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Failed to fetch product details from Shopify");
            assert_eq!(request_id.as_deref(), Some("req-404"));
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn test_inventory_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-04/inventory_levels.json"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .inventory_levels(&BTreeSet::from([1]))
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), 403);
    assert_eq!(
        error.to_string(),
        "Failed to fetch inventory levels from Shopify (status 403)"
    );
}

#[tokio::test]
async fn test_failed_request_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server).list_products(None).await.unwrap_err();
    assert_eq!(error.status_code(), 503);
}

#[tokio::test]
async fn test_invalid_json_is_malformed_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server).list_products(None).await.unwrap_err();
    assert!(matches!(error, CatalogError::MalformedUpstreamData { .. }));
    assert_eq!(error.status_code(), 502);
}

#[tokio::test]
async fn test_missing_body_key_is_malformed_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-04/inventory_levels.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"levels": []})))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .inventory_levels(&BTreeSet::from([1]))
        .await
        .unwrap_err();
    assert!(matches!(error, CatalogError::MalformedUpstreamData { .. }));
}
