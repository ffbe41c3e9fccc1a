mod common;

use common::*;
use rallies_core::commands::feed::{FeedClient, FeedError, render_feed_lines, select_feed_items};
use rallies_core::core::agent::{ActionClient, ActionError, ERROR_MARKER};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn action_server(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/complete-cli-action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn action_sends_step_and_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/complete-cli-action"))
        .and(header("authorization", "Bearer rk-live-1"))
        .and(body_json(json!({
            "question": "q",
            "title": "Quote",
            "description": "Fetch quote"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(allowed_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri()).with_api_key("rk-live-1");
    let client = ActionClient::new(&config);
    let outcome = client.complete("q", "Quote", "Fetch quote").await.unwrap();

    assert_eq!(outcome.results["price"], 189.5);
    assert_eq!(outcome.usage.remaining(), 7);
}

#[tokio::test]
async fn missing_results_default_to_placeholder() {
    let server = action_server(json!({ "allowed": true })).await;
    let client = ActionClient::new(&config_for(&server.uri()));

    let outcome = client.complete("q", "t", "d").await.unwrap();
    assert_eq!(outcome.results, json!("No results returned"));
    assert_eq!(outcome.usage.current_usage, 0);
    assert_eq!(outcome.usage.limit, 0);
}

#[tokio::test]
async fn denials_map_to_categories() {
    let cases = [
        ("Rate limit exceeded", "⚠ Rate limit reached: Rate limit exceeded"),
        ("Invalid API key", "⚠ Authentication failed: Invalid API key"),
        ("Plan does not include options", "⚠ Access denied: Plan does not include options"),
    ];

    for (message, expected) in cases {
        let server = action_server(denied_body(message)).await;
        let client = ActionClient::new(&config_for(&server.uri()));
        let err = client.complete("q", "t", "d").await.unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
}

#[tokio::test]
async fn denial_without_message_is_unknown_error() {
    let server = action_server(json!({ "allowed": false })).await;
    let client = ActionClient::new(&config_for(&server.uri()));

    let err = client.complete("q", "t", "d").await.unwrap_err();
    assert_eq!(err.to_string(), "⚠ Access denied: Unknown error");
}

#[tokio::test]
async fn non_ok_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = ActionClient::new(&config_for(&server.uri()));

    let err = client.complete("q", "t", "d").await.unwrap_err();
    assert!(matches!(err, ActionError::Http(503)));
    assert!(err.to_string().starts_with(ERROR_MARKER));
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let client = ActionClient::new(&config_for("http://127.0.0.1:9"));
    let err = client.complete("q", "t", "d").await.unwrap_err();
    assert!(matches!(err, ActionError::Network(_)));
    assert!(err.to_string().starts_with("⚠ Network Error:"));
}

#[tokio::test]
async fn feed_is_fetched_filtered_and_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-feed-conversations"))
        .and(query_param("myfeed", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "conversations": [
                { "question": "Is NVDA overvalued?", "unique_link": "a1", "score": 5, "created_at": "2024-05-01T10:00:00Z" },
                { "question": "Low score", "unique_link": "a2", "score": 3, "created_at": "2024-05-03T10:00:00Z" },
                { "question": "TSLA deliveries?", "unique_link": "a3", "score": 9.5, "created_at": "2024-05-02T10:00:00Z" }
            ]
        })))
        .mount(&server)
        .await;

    let client = FeedClient::new(&config_for(&server.uri()));
    let items = select_feed_items(client.fetch().await.unwrap());
    let questions: Vec<_> = items.iter().map(|i| i.question.clone()).collect();
    assert_eq!(
        questions,
        vec![Some("TSLA deliveries?".to_string()), Some("Is NVDA overvalued?".to_string())]
    );

    let lines = render_feed_lines(&items);
    assert_eq!(lines[0], " 1. [TSLA deliveries?](https://rallies.ai/chat/a3)");
}

#[tokio::test]
async fn unsuccessful_feed_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-feed-conversations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "conversations": [] })),
        )
        .mount(&server)
        .await;

    let client = FeedClient::new(&config_for(&server.uri()));
    assert!(matches!(client.fetch().await, Err(FeedError::Unavailable)));
}

#[tokio::test]
async fn feed_status_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = FeedClient::new(&config_for(&server.uri()));
    let err = client.fetch().await.unwrap_err();
    assert_eq!(err.to_string(), "API request failed with status 500");
}
