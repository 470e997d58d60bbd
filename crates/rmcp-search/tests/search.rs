use httpmock::prelude::*;
use rmcp::handler::server::wrapper::Parameters;
use rmcp_search::{QueryParams, SearchConfig, SearchError, SearchProxy, SearchServer, NO_RESULTS};
use serde_json::{json, Value};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig::default()
        .with_api_key("tvly-test")
        .with_base_url(server.base_url())
}

fn first_text(result: &rmcp::model::CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .expect("text content")
}

#[tokio::test]
async fn forwards_query_and_returns_results() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/search")
                .header("authorization", "Bearer tvly-test")
                .json_body(json!({ "query": "rust async" }));
            then.status(200).json_body(json!({
                "query": "rust async",
                "results": [
                    { "title": "Tokio", "url": "https://tokio.rs", "content": "runtime", "score": 0.9 }
                ]
            }));
        })
        .await;

    let results = SearchProxy::new(config_for(&server))
        .search("rust async")
        .await
        .expect("results");

    mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["url"], "https://tokio.rs");
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({ "results": [] }));
        })
        .await;

    let err = SearchProxy::new(SearchConfig::default().with_base_url(server.base_url()))
        .search("anything")
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Configuration(_)));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn provider_failure_keeps_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/search");
            then.status(432).body("plan limit exceeded");
        })
        .await;

    let err = SearchProxy::new(config_for(&server))
        .search("anything")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Provider { status: 432, ref message } if message == "plan limit exceeded"
    ));
}

#[tokio::test]
async fn body_without_results_is_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/search");
            then.status(200).json_body(json!({ "answer": "42" }));
        })
        .await;

    let err = SearchProxy::new(config_for(&server))
        .search("anything")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::InvalidResponse(ref message) if message == "missing results array"
    ));
}

#[tokio::test]
async fn tool_returns_results_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/search");
            then.status(200)
                .json_body(json!({ "results": [{ "title": "a" }, { "title": "b" }] }));
        })
        .await;

    let result = SearchServer::new(config_for(&server))
        .get_search_results(Parameters(QueryParams {
            query: "letters".to_string(),
        }))
        .await
        .expect("tool result");

    assert_ne!(result.is_error, Some(true));
    let value: Value = serde_json::from_str(&first_text(&result)).expect("json payload");
    assert_eq!(value, json!([{ "title": "a" }, { "title": "b" }]));
}

#[tokio::test]
async fn tool_flags_failure_with_sentinel_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/search");
            then.status(200).json_body(json!({ "answer": "no results key" }));
        })
        .await;

    let result = SearchServer::new(config_for(&server))
        .get_search_results(Parameters(QueryParams {
            query: "void".to_string(),
        }))
        .await
        .expect("tool result");

    assert_eq!(result.is_error, Some(true));
    assert_eq!(first_text(&result), NO_RESULTS);
}
