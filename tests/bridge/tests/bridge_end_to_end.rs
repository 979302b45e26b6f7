//! End to end: the storybook workflow over the stdio wire format.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use storybook::StoryLibrary;
use storybook_mcp::config::ServerConfig;
use storybook_mcp::schema::SchemaRegistry;
use storybook_mcp::{build_dispatcher, StdioTransport};
use tempfile::tempdir;

fn line(value: Value) -> String {
    value.to_string() + "\n"
}

fn tool_call(id: i64, name: &str, arguments: Value) -> String {
    line(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    }))
}

async fn run_session(story_dir: &Path, input: String) -> Vec<Value> {
    let schemas = SchemaRegistry::load_dir(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../crates/storybook-mcp/schemas"),
    )
    .unwrap();
    let library = StoryLibrary::open(story_dir).unwrap();
    let dispatcher = build_dispatcher(&ServerConfig::default(), &schemas, library).unwrap();
    let transport = StdioTransport::new(Arc::new(dispatcher));

    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn handshake() -> String {
    line(json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "bridge", "version": "1.0"}
        }
    })) + &line(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
}

#[tokio::test]
async fn test_save_then_get_story() {
    let dir = tempdir().unwrap();

    let input = handshake()
        + &tool_call(
            1,
            "save_story",
            json!({"title": "My Great Day", "content": "It was sunny."}),
        )
        + &tool_call(2, "get_story", json!({"filename": "my_great_day.md"}));

    let responses = run_session(dir.path(), input).await;
    assert_eq!(responses.len(), 3);

    let saved = responses[1]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(saved.starts_with("Story has been saved at: "));
    assert!(dir.path().join("my_great_day.md").is_file());

    let story = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(story.contains("# My Great Day"));
    assert!(story.contains("It was sunny."));
}

#[tokio::test]
async fn test_many_stories_in_one_session() {
    let dir = tempdir().unwrap();

    let mut input = handshake();
    for i in 0..50 {
        input += &tool_call(
            i + 1,
            "save_story",
            json!({"title": format!("Night {i:02}"), "content": format!("Story {i}")}),
        );
    }
    input += &tool_call(100, "list_stories", json!({}));

    let responses = run_session(dir.path(), input).await;
    assert_eq!(responses.len(), 52);
    assert!(responses[1..51]
        .iter()
        .all(|r| r["result"]["isError"] == false));

    let listed = responses[51]["result"]["content"][0]["text"].as_str().unwrap();
    assert_eq!(listed.lines().count(), 50);
    assert_eq!(listed.lines().next(), Some("night_00.md"));
}
