//! Test data fixtures for MCP server tests.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use storybook::StoryLibrary;
use storybook_mcp::config::ServerConfig;
use storybook_mcp::protocol::{Dispatcher, ProtocolHandler};
use storybook_mcp::schema::SchemaRegistry;
use storybook_mcp::server::build_dispatcher;

/// The schema documents bundled with the crate.
pub fn bundled_schema_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas")
}

/// Load the bundled schema documents.
pub fn bundled_schemas() -> SchemaRegistry {
    SchemaRegistry::load_dir(bundled_schema_dir()).expect("Failed to load bundled schemas")
}

/// A story library in a fresh temporary directory.
///
/// The directory lives as long as the returned `TempDir`.
pub fn test_library() -> (TempDir, StoryLibrary) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let library = StoryLibrary::open(dir.path()).expect("Failed to open story library");
    (dir, library)
}

/// A fully wired dispatcher over a temporary story directory.
pub fn test_dispatcher() -> (TempDir, Arc<Dispatcher>) {
    let (dir, library) = test_library();
    let dispatcher = build_dispatcher(&ServerConfig::default(), &bundled_schemas(), library)
        .expect("Failed to build dispatcher");
    (dir, Arc::new(dispatcher))
}

/// A request envelope as a wire line.
pub fn request(id: i64, method: &str, params: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
    .to_string()
}

/// An `initialize` request envelope.
pub fn initialize_request(id: i64) -> String {
    request(
        id,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "0.0.1" }
        }),
    )
}

/// A `tools/call` request envelope.
pub fn tool_call(id: i64, name: &str, arguments: Value) -> String {
    request(id, "tools/call", json!({ "name": name, "arguments": arguments }))
}

/// A protocol session that has completed the handshake.
pub async fn initialized_handler(dispatcher: Arc<Dispatcher>) -> ProtocolHandler {
    let handler = ProtocolHandler::new(dispatcher);
    let response = handler
        .handle_text(&initialize_request(0))
        .await
        .expect("initialize must be answered");
    assert!(response.get("result").is_some(), "initialize failed: {response}");
    handler
}

/// Text of the first content block of a `tools/call` result.
pub fn first_text(result: &Value) -> &str {
    result["content"][0]["text"]
        .as_str()
        .expect("Expected text content")
}
