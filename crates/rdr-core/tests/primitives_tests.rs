//! HTTP primitive tests: URL layout, headers, and status handling.

mod common;

use common::*;
use rdr_core::error::ApiError;
use wiremock::matchers::{body_json, header, method, path};

#[tokio::test]
async fn test_get_sends_api_key_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards"))
        .and(header("authorization", "Key test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: Value = client.get("dashboards").await.unwrap();
    assert_eq!(value, json!({"results": []}));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboards"))
        .and(header("authorization", "Key test-api-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Ops"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: Value = client.post("dashboards", &json!({"name": "Ops"})).await.unwrap();
    assert_eq!(value["id"], json!(1));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/widgets/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: Value = client.delete("widgets/9").await.unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn test_non_200_status_is_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let result: Result<Value, ApiError> = client.get("dashboards/missing").await;
    match result {
        Err(ApiError::RequestFailed {
            method,
            endpoint,
            status,
            message,
        }) => {
            assert_eq!(method, "GET");
            assert_eq!(endpoint, "dashboards/missing");
            assert_eq!(status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }

    let result: Result<Value, ApiError> = client.post("queries", &json!({})).await;
    assert!(matches!(
        result,
        Err(ApiError::RequestFailed { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_created_status_is_not_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboards"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, ApiError> = client.post("dashboards", &json!({"name": "x"})).await;
    assert!(matches!(
        result,
        Err(ApiError::RequestFailed { status: 201, .. })
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = RedashClient::new(
        TEST_API_KEY.to_string(),
        Some("http://127.0.0.1:1".to_string()),
    )
    .expect("client creation failed");

    let result: Result<Value, ApiError> = client.get("dashboards").await;
    assert!(matches!(result, Err(ApiError::Transport { .. })));
}

#[tokio::test]
async fn test_slow_response_is_awaited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"id": 1, "slug": "sales"}]}))
                .set_delay(std::time::Duration::from_secs(31)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let dashboards = client.list_dashboards().await.unwrap();
    assert_eq!(dashboards[0].slug, "sales");
}
