//! SSE transport driven in-process through the axum router.

#![cfg(feature = "sse")]

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use storybook_mcp::protocol::Dispatcher;
use storybook_mcp::registry::{tool_fn, CapabilityRegistry};
use storybook_mcp::transport::SseTransport;
use storybook_mcp::types::{ToolCallResult, ToolDefinition};

use common::fixtures::{initialize_request, request, test_dispatcher, tool_call};

/// Reads `event:`/`data:` pairs off an open event stream.
struct EventReader {
    body: Body,
    buf: String,
}

impl EventReader {
    async fn next(&mut self) -> (String, String) {
        loop {
            if let Some(end) = self.buf.find("\n\n") {
                let raw: String = self.buf.drain(..end + 2).collect();
                let mut event = String::new();
                let mut data = String::new();
                for line in raw.lines() {
                    if let Some(value) = line.strip_prefix("event:") {
                        event = value.trim().to_string();
                    } else if let Some(value) = line.strip_prefix("data:") {
                        data.push_str(value.trim_start());
                    }
                }
                if event.is_empty() && data.is_empty() {
                    continue;
                }
                return (event, data);
            }

            let frame = tokio::time::timeout(Duration::from_secs(5), self.body.frame())
                .await
                .expect("timed out waiting for an event")
                .expect("event stream ended")
                .expect("event stream failed");
            if let Ok(bytes) = frame.into_data() {
                self.buf.push_str(&String::from_utf8_lossy(&bytes));
            }
        }
    }

    async fn next_message(&mut self) -> Value {
        let (event, data) = self.next().await;
        assert_eq!(event, "message");
        serde_json::from_str(&data).unwrap()
    }
}

/// Open `GET /sse` and return the message URL plus the event reader.
async fn connect(app: &Router) -> (String, EventReader) {
    let response = app
        .clone()
        .oneshot(Request::get("/sse").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let mut events = EventReader {
        body: response.into_body(),
        buf: String::new(),
    };
    let (event, endpoint) = events.next().await;
    assert_eq!(event, "endpoint");
    assert!(endpoint.starts_with("/message?sessionId="));
    (endpoint, events)
}

async fn post(app: &Router, uri: &str, body: String) -> StatusCode {
    app.clone()
        .oneshot(Request::post(uri).body(Body::from(body)).unwrap())
        .await
        .unwrap()
        .status()
}

async fn handshake(app: &Router, endpoint: &str, events: &mut EventReader) {
    assert_eq!(post(app, endpoint, initialize_request(0)).await, StatusCode::ACCEPTED);
    let response = events.next_message().await;
    assert_eq!(response["id"], 0);
    assert!(response["result"]["protocolVersion"].is_string());
}

fn timed_dispatcher() -> Arc<Dispatcher> {
    let mut registry = CapabilityRegistry::new();
    for (name, delay) in [("slow", 400), ("fast", 0)] {
        registry
            .register_tool(
                ToolDefinition {
                    name: name.to_string(),
                    description: format!("Answers after {delay}ms"),
                    input_schema: json!({"type": "object"}),
                },
                tool_fn(move |_| {
                    std::thread::sleep(Duration::from_millis(delay));
                    Ok(ToolCallResult::text(name))
                }),
            )
            .unwrap();
    }
    Arc::new(Dispatcher::from_registry(registry))
}

#[tokio::test]
async fn test_health() {
    let (_dir, dispatcher) = test_dispatcher();
    let app = SseTransport::new(dispatcher).router();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_round_trip_over_stream() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = SseTransport::new(dispatcher);
    let app = transport.router();

    let (endpoint, mut events) = connect(&app).await;
    assert_eq!(transport.sessions().len(), 1);
    handshake(&app, &endpoint, &mut events).await;

    let status = post(&app, &endpoint, tool_call(1, "list_characters", json!({}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let response = events.next_message().await;
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["content"][0]["text"], "Jack\nRam\nRobert");
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (_dir, dispatcher) = test_dispatcher();
    let app = SseTransport::new(dispatcher).router();

    let status = post(&app, "/message?sessionId=does-not-exist", request(1, "ping", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_body() {
    let (_dir, dispatcher) = test_dispatcher();
    let app = SseTransport::new(dispatcher).router();
    let (endpoint, mut events) = connect(&app).await;

    let status = post(&app, &endpoint, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // An invalid envelope with a usable id is answered on the stream.
    let status = post(&app, &endpoint, r#"{"jsonrpc":"1.0","id":5,"method":"ping"}"#.to_string()).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let response = events.next_message().await;
    assert_eq!(response["id"], 5);
    assert_eq!(response["error"]["code"], -32600);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_posts_each_answered_once() {
    let app = SseTransport::new(timed_dispatcher()).router();
    let (endpoint, mut events) = connect(&app).await;
    handshake(&app, &endpoint, &mut events).await;

    let slow = json!({"jsonrpc": "2.0", "id": "1", "method": "tools/call", "params": {"name": "slow"}});
    let fast = json!({"jsonrpc": "2.0", "id": "2", "method": "tools/call", "params": {"name": "fast"}});
    assert_eq!(post(&app, &endpoint, slow.to_string()).await, StatusCode::ACCEPTED);
    assert_eq!(post(&app, &endpoint, fast.to_string()).await, StatusCode::ACCEPTED);

    let first = events.next_message().await;
    let second = events.next_message().await;

    assert_eq!(first["id"], "2");
    assert_eq!(first["result"]["content"][0]["text"], "fast");
    assert_eq!(second["id"], "1");
    assert_eq!(second["result"]["content"][0]["text"], "slow");

    // Nothing else was delivered for either id.
    let ping = request(3, "ping", json!({}));
    assert_eq!(post(&app, &endpoint, ping).await, StatusCode::ACCEPTED);
    assert_eq!(events.next_message().await["id"], 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_disconnect_drops_in_flight_response() {
    let transport = SseTransport::new(timed_dispatcher());
    let app = transport.router();

    let (endpoint, mut events) = connect(&app).await;
    handshake(&app, &endpoint, &mut events).await;
    let (other_endpoint, mut other_events) = connect(&app).await;
    handshake(&app, &other_endpoint, &mut other_events).await;
    assert_eq!(transport.sessions().len(), 2);

    let slow = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call", "params": {"name": "slow"}});
    assert_eq!(post(&app, &endpoint, slow.to_string()).await, StatusCode::ACCEPTED);

    drop(events);
    assert_eq!(transport.sessions().len(), 1);

    // Let the slow handler finish against the closed session.
    tokio::time::sleep(Duration::from_millis(600)).await;

    let status = post(&app, &endpoint, request(2, "ping", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The other session is unaffected.
    let status = post(&app, &other_endpoint, request(3, "ping", json!({}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(other_events.next_message().await["id"], 3);
}
