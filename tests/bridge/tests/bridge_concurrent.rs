//! Concurrent access: several client sessions sharing one server.
//!
//! Sessions share the dispatcher and the story directory but keep their
//! own handshake state.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::Barrier;

use serde_json::json;
use storybook::StoryLibrary;
use storybook_mcp::config::ServerConfig;
use storybook_mcp::schema::SchemaRegistry;
use storybook_mcp::types::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestId};
use storybook_mcp::{build_dispatcher, Dispatcher, ProtocolHandler};
use tempfile::tempdir;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn create_dispatcher(story_dir: &Path) -> Arc<Dispatcher> {
    let schemas = SchemaRegistry::load_dir(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../crates/storybook-mcp/schemas"),
    )
    .expect("Failed to load schemas");
    let library = StoryLibrary::open(story_dir).expect("Failed to open story library");
    let dispatcher = build_dispatcher(&ServerConfig::default(), &schemas, library)
        .expect("Failed to build dispatcher");
    Arc::new(dispatcher)
}

async fn init_handler(handler: &ProtocolHandler) {
    let init_req = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: RequestId::from(0),
        method: "initialize".to_string(),
        params: Some(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "1.0"}
        })),
    };
    handler
        .handle_message(JsonRpcMessage::Request(init_req))
        .await;

    let init_notif = JsonRpcNotification {
        jsonrpc: "2.0".to_string(),
        method: "notifications/initialized".to_string(),
        params: None,
    };
    handler
        .handle_message(JsonRpcMessage::Notification(init_notif))
        .await;
}

async fn call_tool(
    handler: &ProtocolHandler,
    id: i64,
    name: &str,
    args: serde_json::Value,
) -> serde_json::Value {
    let req = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: RequestId::from(id),
        method: "tools/call".to_string(),
        params: Some(json!({"name": name, "arguments": args})),
    };
    handler
        .handle_message(JsonRpcMessage::Request(req))
        .await
        .unwrap()
}

fn result_text(response: &serde_json::Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("Expected text in tool response")
}

// ─── Tests ─────────────────────────────────────────────────────────────────

/// Several sessions writing different stories at the same time.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers() {
    let dir = tempdir().unwrap();
    let dispatcher = create_dispatcher(dir.path());

    let barrier = Arc::new(Barrier::new(5));
    let mut handles = vec![];

    for author in 0..5u32 {
        let dispatcher = Arc::clone(&dispatcher);
        let barrier = Arc::clone(&barrier);

        handles.push(tokio::spawn(async move {
            let handler = ProtocolHandler::new(dispatcher);
            init_handler(&handler).await;
            barrier.wait().await; // Synchronize start

            let response = call_tool(
                &handler,
                1,
                "save_story",
                json!({
                    "title": format!("Tale {author}"),
                    "content": format!("Written by author {author}.")
                }),
            )
            .await;
            assert_eq!(response["result"]["isError"], false);

            let response = call_tool(
                &handler,
                2,
                "get_story",
                json!({"filename": format!("tale_{author}.md")}),
            )
            .await;
            assert!(result_text(&response).contains(&format!("Written by author {author}.")));

            author
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let reader = ProtocolHandler::new(dispatcher);
    init_handler(&reader).await;
    let response = call_tool(&reader, 1, "list_stories", json!({})).await;
    let listed: Vec<_> = result_text(&response).lines().collect();
    assert_eq!(
        listed,
        vec!["tale_0.md", "tale_1.md", "tale_2.md", "tale_3.md", "tale_4.md"]
    );
}

/// A handshake on one session does not initialize another.
#[tokio::test]
async fn test_sessions_negotiate_independently() {
    let dir = tempdir().unwrap();
    let dispatcher = create_dispatcher(dir.path());

    let ready = ProtocolHandler::new(Arc::clone(&dispatcher));
    init_handler(&ready).await;
    let fresh = ProtocolHandler::new(dispatcher);

    let response = call_tool(&ready, 1, "list_characters", json!({})).await;
    assert!(response.get("result").is_some());

    let response = call_tool(&fresh, 1, "list_characters", json!({})).await;
    assert_eq!(response["error"]["code"], -32600);
}

/// A story saved by one server process is readable by the next.
#[tokio::test]
async fn test_handoff_between_servers() {
    let dir = tempdir().unwrap();

    for i in 0..3u32 {
        let handler = ProtocolHandler::new(create_dispatcher(dir.path()));
        init_handler(&handler).await;

        let response = call_tool(&handler, 1, "list_stories", json!({})).await;
        let seen = match result_text(&response) {
            "No stories" => 0,
            text => text.lines().count() as u32,
        };
        assert_eq!(seen, i, "Should see {i} stories from previous servers");

        call_tool(
            &handler,
            2,
            "save_story",
            json!({"title": format!("Chapter {i}"), "content": "..."}),
        )
        .await;
    }
}
