//! Data source, query, and query-result endpoint tests.

mod common;

use common::*;
use rdr_core::AppError;
use rdr_core::api::models::{CreateQueryParams, QueryResultsParams};
use rdr_core::error::{ApiError, ResourceNotFound};
use rdr_core::utils::poll::PollConfig;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};

fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig {
        max_attempts,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        multiplier: 1.0,
    }
}

#[tokio::test]
async fn test_create_data_source_posts_fields_verbatim() {
    let mock_server = MockServer::start().await;

    let options = object(json!({"host": "db.internal", "port": 5432, "dbname": "analytics"}));

    Mock::given(method("POST"))
        .and(path("/api/data_sources"))
        .and(body_json(json!({
            "type": "pg",
            "name": "Warehouse",
            "options": {"host": "db.internal", "port": 5432, "dbname": "analytics"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Warehouse"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client
        .create_data_source("pg", "Warehouse", options)
        .await
        .unwrap();
    assert_eq!(created["id"], json!(4));
}

#[tokio::test]
async fn test_create_query_without_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queries"))
        .and(body_json(json!({
            "data_source_id": 4,
            "name": "Daily revenue",
            "query": "select day, sum(amount) from orders group by 1",
            "description": "",
            "options": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = CreateQueryParams::new(
        4,
        "Daily revenue",
        "select day, sum(amount) from orders group by 1",
    );
    params.with_results = false;

    let created = client.create_query(params).await.unwrap();
    assert_eq!(created.query["id"], json!(12));
    assert!(created.results.is_none());
}

#[tokio::test]
async fn test_create_query_with_results_executes_it() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .and(body_json(json!({
            "data_source_id": 4,
            "query": "select 1",
            "max_age": 0,
            "parameters": {},
            "query_id": 12
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-1", "status": 1}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client
        .create_query(CreateQueryParams::new(4, "One", "select 1"))
        .await
        .unwrap();

    assert_eq!(created.results.unwrap()["job"]["id"], json!("job-1"));
}

#[tokio::test]
async fn test_create_query_surfaces_execution_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .create_query(CreateQueryParams::new(4, "One", "select 1"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Api(ApiError::RequestFailed { status: 400, .. }))
    ));
}

#[tokio::test]
async fn test_refresh_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queries/12/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-2", "status": 1}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.refresh_query(12).await.unwrap();
    assert_eq!(response["job"]["id"], json!("job-2"));
}

#[tokio::test]
async fn test_generate_query_results_returns_job_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .and(body_json(json!({
            "data_source_id": 4,
            "query": "select {{ n }}",
            "max_age": 60,
            "parameters": {"n": 3}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-3", "status": 1}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = QueryResultsParams::new(4, "select {{ n }}");
    params.max_age = 60;
    params.parameters = object(json!({"n": 3}));

    let response = client.generate_query_results(params).await.unwrap();
    assert_eq!(response["job"]["status"], json!(1));
}

#[tokio::test]
async fn test_generate_query_results_follows_job_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-4", "status": 1}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/job-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"job": {"id": "job-4", "status": 3, "query_result_id": 77}}),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/query_results/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"query_result": {"id": 77, "data": {"rows": [{"n": 1}]}}}),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = QueryResultsParams::new(4, "select 1 as n");
    params.return_results = true;

    let result = client.generate_query_results(params).await.unwrap();
    assert_eq!(result["query_result"]["data"]["rows"][0]["n"], json!(1));
}

#[tokio::test]
async fn test_generate_query_results_does_not_wait_for_running_job() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-5", "status": 1}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/job-5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"job": {"id": "job-5", "status": 2, "query_result_id": null}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = QueryResultsParams::new(4, "select pg_sleep(10)");
    params.return_results = true;

    let result = client.generate_query_results(params).await;
    match result {
        Err(AppError::NotFound(ResourceNotFound { resource_type, id })) => {
            assert_eq!(resource_type, "query result");
            assert_eq!(id, "job-5");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_query_results_cached_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query_result": {"id": 5, "data": {"rows": []}}})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut params = QueryResultsParams::new(4, "select 1");
    params.max_age = 3600;
    params.return_results = true;

    let result = client.generate_query_results(params).await.unwrap();
    assert_eq!(result["query_result"]["id"], json!(5));
}

#[tokio::test]
async fn test_generate_query_results_and_wait_polls_until_done() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-6", "status": 1}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/job-6"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-6", "status": 2}})),
        )
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/job-6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"job": {"id": "job-6", "status": 3, "query_result_id": 88}}),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/query_results/88"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"query_result": {"id": 88}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .generate_query_results_and_wait(QueryResultsParams::new(4, "select 1"), &fast_poll(5))
        .await
        .unwrap();
    assert_eq!(result["query_result"]["id"], json!(88));
}

#[tokio::test]
async fn test_generate_query_results_and_wait_reports_failed_job() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-7", "status": 1}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/job-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"job": {"id": "job-7", "status": 4, "error": "relation \"orders\" does not exist"}}),
        ))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .generate_query_results_and_wait(QueryResultsParams::new(4, "select * from orders"), &fast_poll(5))
        .await;

    match result {
        Err(AppError::Api(ApiError::JobFailed { job_id, status, message })) => {
            assert_eq!(job_id, "job-7");
            assert_eq!(status, 4);
            assert!(message.contains("orders"));
        }
        other => panic!("Expected JobFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_query_results_and_wait_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-8", "status": 1}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/jobs/job-8"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-8", "status": 2}})),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .generate_query_results_and_wait(QueryResultsParams::new(4, "select 1"), &fast_poll(3))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Api(ApiError::JobTimeout { attempts: 3, .. }))
    ));
}

#[tokio::test]
async fn test_run_query_uses_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [
                {"id": 11, "data_source_id": 1, "name": "a", "query": "select 'a'"},
                {"id": 12, "data_source_id": 4, "name": "b", "query": "select 'b'"}
            ]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .and(body_json(json!({
            "data_source_id": 4,
            "query": "select 'b'",
            "max_age": 0,
            "parameters": {},
            "query_id": 12
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-9", "status": 1}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.run_query(12).await.unwrap();
    assert_eq!(response["job"]["id"], json!("job-9"));
}

#[tokio::test]
async fn test_run_query_unknown_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.run_query(99).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_run_query_ignores_rows_without_data_source() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 1, "data_source_id": null, "name": "orphan", "query": "select 'a'"},
                {"id": 2, "data_source_id": 5, "name": "b", "query": "select 'b'"}
            ]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .and(body_json(json!({
            "data_source_id": 5,
            "query": "select 'b'",
            "max_age": 0,
            "parameters": {},
            "query_id": 2
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job": {"id": "job-10", "status": 1}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.run_query(2).await.unwrap();
    assert_eq!(response["job"]["id"], json!("job-10"));
}

#[tokio::test]
async fn test_run_query_without_data_source() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "data_source_id": null, "name": "orphan", "query": "select 'a'"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/query_results"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.run_query(1).await {
        Err(AppError::Api(ApiError::InvalidResponse { endpoint, message })) => {
            assert_eq!(endpoint, "queries");
            assert!(message.contains("data_source_id"));
        }
        other => panic!("Expected InvalidResponse, got {:?}", other),
    }
}
