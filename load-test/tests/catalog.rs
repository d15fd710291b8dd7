use httpmock::{Method::GET, MockServer};
use serde_json::json;
use serial_test::serial;
use shop_load_test::scenarios::catalog;

mod common;

#[tokio::test]
#[serial]
/// details are only requested for ids that came from a listing
async fn catalog_only_views_listed_products() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path("/product-service/api/products");
            then.status(200)
                .json_body(json!({"content": [{"productId": 1}, {"productId": 2}, {"productTitle": "no id"}]}));
        })
        .await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/product-service/api/products/1");
            then.status(200).json_body(json!({"productId": 1}));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/product-service/api/products/2");
            then.status(200).json_body(json!({"productId": 2}));
        })
        .await;

    let config = common::fast_config();
    let metrics = common::run(
        common::build_configuration(&server, 2),
        catalog::scenario(&config).unwrap(),
    )
    .await;

    assert!(listing.hits_async().await > 0);
    let (ok, failed) = common::counts(&metrics, "GET /products/{id}");
    assert!(ok > 0, "no product detail was requested");
    // any other id would have hit the mock server's 404
    assert_eq!(failed, 0);
    // requests cut off by the end of the run reach the server but not the metrics
    assert!(first.hits_async().await + second.hits_async().await >= ok);
    assert_eq!(common::counts(&metrics, "GET /products").1, 0);
}

#[tokio::test]
#[serial]
/// a listing that is not json is a failed request, and no detail is attempted
async fn unexpected_listing_shape_fails_the_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/product-service/api/products");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let config = common::fast_config();
    let metrics = common::run(
        common::build_configuration(&server, 1),
        catalog::scenario(&config).unwrap(),
    )
    .await;

    let (_, failed) = common::counts(&metrics, "GET /products");
    assert!(failed > 0);
    assert_eq!(common::counts(&metrics, "GET /products/{id}"), (0, 0));
}
