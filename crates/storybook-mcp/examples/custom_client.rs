//! Example: Custom MCP client in Rust.
//!
//! Spawns the storybook-mcp server over stdio, looks up a character,
//! saves a story, and reads it back.
//!
//! Usage:
//!   cargo build && cargo run --example custom_client

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use serde_json::{json, Value};

/// Simple MCP client that communicates with the server over stdio.
struct SimpleClient {
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    next_id: i64,
}

impl SimpleClient {
    /// Send a JSON-RPC request and read the response.
    fn request(&mut self, method: &str, params: Option<Value>) -> Value {
        self.next_id += 1;
        let request = json!({
            "jsonrpc": "2.0",
            "id": self.next_id,
            "method": method,
            "params": params
        });

        let line = serde_json::to_string(&request).unwrap() + "\n";
        self.stdin.write_all(line.as_bytes()).unwrap();
        self.stdin.flush().unwrap();

        let mut response_line = String::new();
        self.reader.read_line(&mut response_line).unwrap();
        serde_json::from_str(&response_line).unwrap()
    }

    /// Send a JSON-RPC notification (no response expected).
    fn notify(&mut self, method: &str) {
        let notification = json!({ "jsonrpc": "2.0", "method": method });
        let line = serde_json::to_string(&notification).unwrap() + "\n";
        self.stdin.write_all(line.as_bytes()).unwrap();
        self.stdin.flush().unwrap();
    }

    /// Call a tool and return the text of its first content block.
    fn call_tool(&mut self, name: &str, arguments: Value) -> String {
        let response = self.request(
            "tools/call",
            Some(json!({ "name": name, "arguments": arguments })),
        );
        response["result"]["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

fn main() {
    println!("=== Storybook MCP Client Example ===\n");

    let server_path = std::env::current_dir()
        .unwrap()
        .join("target/debug/storybook-mcp");

    if !server_path.exists() {
        eprintln!("Server binary not found. Run `cargo build` first.");
        std::process::exit(1);
    }

    let story_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut child = Command::new(&server_path)
        .args(["--stories", &story_dir.path().display().to_string(), "serve"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start server");

    let stdin = child.stdin.take().expect("Failed to open stdin");
    let stdout = child.stdout.take().expect("Failed to open stdout");

    let mut client = SimpleClient {
        stdin,
        reader: BufReader::new(stdout),
        next_id: 0,
    };

    // 1. Initialize
    println!("1. Initializing...");
    let init_response = client.request(
        "initialize",
        Some(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {
                "name": "example-client",
                "version": "1.0.0"
            }
        })),
    );
    println!(
        "   Server: {} v{}",
        init_response["result"]["serverInfo"]["name"],
        init_response["result"]["serverInfo"]["version"]
    );
    client.notify("notifications/initialized");

    // 2. List tools
    println!("\n2. Listing tools...");
    let tools_response = client.request("tools/list", None);
    let tools = tools_response["result"]["tools"].as_array().unwrap();
    println!("   Available tools ({}):", tools.len());
    for tool in tools {
        println!("   - {}", tool["name"].as_str().unwrap());
    }

    // 3. Meet the cast
    println!("\n3. Looking up Ram...");
    let power = client.call_tool("get_superpower", json!({ "character": "Ram" }));
    println!("   Superpower: {power}");

    // 4. Save a story
    println!("\n4. Saving a story...");
    let saved = client.call_tool(
        "save_story",
        json!({ "title": "My Great Day", "content": "It was sunny." }),
    );
    println!("   {saved}");

    // 5. Read it back
    println!("\n5. Reading it back...");
    let story = client.call_tool("get_story", json!({ "filename": "my_great_day.md" }));
    for line in story.lines() {
        println!("   | {line}");
    }

    // Closing stdin ends the session.
    drop(client);
    let _ = child.wait();

    println!("\n=== Example complete ===");
}
