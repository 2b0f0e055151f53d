//! Integration tests for the HTTP boundary.
//!
//! The router is driven in-process with `oneshot`; the upstream model is an
//! httpmock server speaking the chat-completions envelope.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use tripplan_api::{config::Config, create_app, handlers::GENERATE_PATH, AppState};

const API_KEY: &str = "sk-test";

fn config_for(server: &MockServer) -> Config {
    Config {
        api_key: Some(API_KEY.to_string()),
        base_url: server.base_url(),
        upstream_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

fn app_with(config: Config) -> Router {
    create_app(AppState::new(config).unwrap())
}

fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(app: Router, body: &str) -> (StatusCode, Value) {
    send(app, "POST", GENERATE_PATH, body).await
}

// =============================================================================
// Method Dispatch
// =============================================================================

#[tokio::test]
async fn test_health_reports_key_presence() {
    let (status, body) = send(app_with(Config::default()), "GET", GENERATE_PATH, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["path"], GENERATE_PATH);
    assert_eq!(body["hasOpenAIKey"], false);

    let config = Config {
        api_key: Some(API_KEY.to_string()),
        ..Config::default()
    };
    let (_, body) = send(app_with(config), "GET", GENERATE_PATH, "").await;
    assert_eq!(body["hasOpenAIKey"], true);
    assert!(!body.to_string().contains(API_KEY));
}

#[tokio::test]
async fn test_other_methods_rejected() {
    for method in ["PUT", "DELETE", "PATCH"] {
        let (status, body) = send(app_with(Config::default()), method, GENERATE_PATH, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert!(body["error"].as_str().unwrap().contains("Method not allowed"));
    }
}

// =============================================================================
// Inbound Validation
// =============================================================================

#[tokio::test]
async fn test_missing_api_key() {
    let (status, body) = post(app_with(Config::default()), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn test_missing_prompt_never_reaches_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(completion(json!("{}")));
        })
        .await;

    for body in ["", "not json", "{}", r#"{"prompt":"   "}"#, r#"{"prompt":42}"#] {
        let (status, response) = post(app_with(config_for(&server)), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(response["error"], "Missing or invalid 'prompt' in request body.");
    }

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_fallback_prompt_used_when_configured() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("Plan a 1-day highlight trip");
            then.status(200).json_body(completion(json!(
                "{\"suggestions\":[{\"title\":\"Old town\"}]}"
            )));
        })
        .await;

    let config = Config {
        fallback_prompt: Some("Plan a 1-day highlight trip for a popular city.".to_string()),
        ..config_for(&server)
    };
    let (status, body) = post(app_with(config), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["title"], "Old town");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_prompt_is_capped() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("\"0123456789\\n\\nTrip structure notes");
            then.status(200).json_body(completion(json!(
                "{\"suggestions\":[{\"title\":\"x\"}]}"
            )));
        })
        .await;

    let config = Config {
        max_prompt_chars: 10,
        ..config_for(&server)
    };
    let (status, _) = post(app_with(config), r#"{"prompt":"0123456789ABCDEF"}"#).await;

    assert_eq!(status, StatusCode::OK);
    mock.assert_async().await;
}

// =============================================================================
// Generation Path
// =============================================================================

#[tokio::test]
async fn test_generate_normalizes_suggestions() {
    let server = MockServer::start_async().await;
    let content = json!({
        "suggestions": [
            { "id": "s1", "title": "Walk", "timeOfDay": "Morning", "dayHint": 1, "description": "d", "notes": "n" },
            { "timeOfDay": "SIDEWAYS", "neighborhood": "Alfama" }
        ]
    })
    .to_string();
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_contains("exactly 6 suggestions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion(json!(content)));
        })
        .await;

    let (status, body) = post(
        app_with(config_for(&server)),
        r#"{"prompt":"Lisbon. Trip length: 2 days.","mode":"full-itinerary"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    mock.assert_async().await;

    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["timeOfDay"], "morning");
    assert_eq!(suggestions[0]["dayHint"], 1);
    assert_eq!(suggestions[1]["id"], "ai-suggestion-2");
    assert_eq!(suggestions[1]["title"], "Activity");
    assert_eq!(suggestions[1]["timeOfDay"], "flex");
    assert_eq!(suggestions[1]["dayHint"], Value::Null);
    assert_eq!(suggestions[1]["neighborhood"], "Alfama");
}

#[tokio::test]
async fn test_generate_accepts_fenced_content() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(completion(json!(
                "```json\n{\"suggestions\":[{\"id\":\"a\",\"title\":\"Tram 28\"}]}\n```"
            )));
        })
        .await;

    let (status, body) = post(app_with(config_for(&server)), r#"{"prompt":"Lisbon"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0]["title"], "Tram 28");
}

// =============================================================================
// Upstream Failures
// =============================================================================

#[tokio::test]
async fn test_content_not_json_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(completion(json!("Sure! Here are some ideas...")));
        })
        .await;

    let (status, body) = post(app_with(config_for(&server)), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "content_parse_failure");
    assert_eq!(body["detail"], "model content was not valid JSON");
    assert_eq!(body["raw"], "Sure! Here are some ideas...");
}

#[tokio::test]
async fn test_body_not_json_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("<html>gateway hiccup</html>");
        })
        .await;

    let (status, body) = post(app_with(config_for(&server)), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "root_parse_failure");
    assert_eq!(body["raw"], "<html>gateway hiccup</html>");
}

#[tokio::test]
async fn test_missing_content_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    let (status, body) = post(app_with(config_for(&server)), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "unexpected_format");
    assert_eq!(body["raw"], json!({ "choices": [] }));
}

#[tokio::test]
async fn test_no_suggestions_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(completion(json!("{\"suggestions\":[]}")));
        })
        .await;

    let (status, body) = post(app_with(config_for(&server)), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "no_suggestions");
    assert_eq!(body["raw"], json!({ "suggestions": [] }));
}

#[tokio::test]
async fn test_upstream_status_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429)
                .json_body(json!({ "error": { "message": "Rate limit reached" } }));
        })
        .await;

    let (status, body) = post(app_with(config_for(&server)), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_status");
    assert_eq!(body["status"], 429);
    assert!(body["detail"].as_str().unwrap().contains("Rate limit reached"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let config = Config {
        api_key: Some(API_KEY.to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        upstream_timeout: Duration::from_secs(2),
        ..Config::default()
    };

    let (status, body) = post(app_with(config), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_unreachable");
}

#[tokio::test]
async fn test_truncated_upstream_body_is_unreachable() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Promises 500 bytes, sends a fragment, then hangs up
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16 * 1024];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 500\r\n\r\n{\"choices\":[",
            )
            .await;
        let _ = socket.shutdown().await;
    });

    let config = Config {
        api_key: Some(API_KEY.to_string()),
        base_url: format!("http://{}", addr),
        upstream_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    let state = AppState::new(config).unwrap();

    let (status, body) = post(create_app(state.clone()), r#"{"prompt":"Rome"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_unreachable");
    assert_eq!(state.metrics.count("upstream_error"), 1);
    assert_eq!(state.metrics.count("root_parse_failure"), 0);
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn test_outcomes_are_counted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions").body_contains("Good trip");
            then.status(200).json_body(completion(json!(
                "{\"suggestions\":[{\"title\":\"x\"}]}"
            )));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions").body_contains("Bad trip");
            then.status(200).json_body(completion(json!("{\"suggestions\":[]}")));
        })
        .await;

    let state = AppState::new(config_for(&server)).unwrap();

    let (status, _) = post(create_app(state.clone()), r#"{"prompt":"Good trip"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(create_app(state.clone()), r#"{"prompt":"Bad trip"}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    assert_eq!(state.metrics.count("ok"), 1);
    assert_eq!(state.metrics.count("no_suggestions"), 1);

    let request = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = create_app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(text.to_vec()).unwrap();
    assert!(text.contains("tripplan_generations_total{outcome=\"ok\"} 1"));
}
