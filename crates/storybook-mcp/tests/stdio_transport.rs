//! Stdio transport over in-memory streams.

mod common;

use serde_json::{json, Value};
use tokio::io::BufReader;

use storybook_mcp::protocol::SessionState;
use storybook_mcp::transport::StdioTransport;
use storybook_mcp::types::error_codes;

use common::fixtures::{initialize_request, request, test_dispatcher, tool_call};

fn responses(output: &[u8]) -> Vec<Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_responses_in_arrival_order() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = StdioTransport::new(dispatcher);

    let input = [
        initialize_request(1),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
        request(2, "tools/list", json!({})),
        tool_call(3, "get_backstory", json!({"character": "Jack"})),
        request(4, "ping", json!({})),
    ]
    .join("\n")
        + "\n";

    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    let ids: Vec<_> = responses(&output).iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3), json!(4)]);
    assert_eq!(transport.handler().state(), SessionState::Closed);
}

#[tokio::test]
async fn test_malformed_line_does_not_end_session() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = StdioTransport::new(dispatcher);

    let input = format!(
        "{}\n{{this is not json\n\n   \n{}\n",
        initialize_request(1),
        tool_call(2, "list_characters", json!({}))
    );

    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses = responses(&output);
    assert_eq!(responses.len(), 3, "blank lines must be skipped");
    assert_eq!(responses[1]["error"]["code"], error_codes::PARSE_ERROR);
    assert!(responses[1]["id"].is_null());
    assert_eq!(responses[2]["id"], 2);
    assert_eq!(responses[2]["result"]["isError"], false);
}

#[tokio::test]
async fn test_invalid_envelope_keeps_id() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = StdioTransport::new(dispatcher);

    let input = "{\"jsonrpc\":\"2.0\",\"id\":\"req-7\",\"method\":42}\n";
    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses = responses(&output);
    assert_eq!(responses[0]["id"], "req-7");
    assert_eq!(responses[0]["error"]["code"], error_codes::INVALID_REQUEST);
}

#[tokio::test]
async fn test_line_split_across_reads() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = StdioTransport::new(dispatcher);

    let mock = tokio_test::io::Builder::new()
        .read(b"{\"jsonrpc\":\"2.0\",\"id\":1,")
        .read(b"\"method\":\"ping\"}\n")
        .build();

    let mut output = Vec::new();
    transport
        .serve(BufReader::new(mock), &mut output)
        .await
        .unwrap();

    let responses = responses(&output);
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn test_eof_without_trailing_newline() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = StdioTransport::new(dispatcher);

    let input = request(1, "ping", json!({}));
    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    assert_eq!(responses(&output).len(), 1);
    assert!(transport.handler().is_closed());
}

#[tokio::test]
async fn test_every_id_shape_gets_an_answer() {
    let (_dir, dispatcher) = test_dispatcher();
    let transport = StdioTransport::new(dispatcher);

    let lines = [
        initialize_request(1),
        r#"{"jsonrpc":"2.0","id":1.5,"method":"tools/list"}"#.to_string(),
        r#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"tools/list"}"#.to_string(),
        r#"{"jsonrpc":"2.0","id":{"a":1},"method":"tools/list"}"#.to_string(),
        r#"{"jsonrpc":"2.0","id":true,"method":"tools/list"}"#.to_string(),
    ];
    let input = lines.join("\n") + "\n";

    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses = responses(&output);
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[1]["id"], json!(1.5));
    assert!(responses[1]["result"]["tools"].is_array());
    assert_eq!(responses[2]["id"], json!(u64::MAX));
    assert!(responses[2]["result"]["tools"].is_array());

    for rejected in &responses[3..] {
        assert!(rejected["id"].is_null());
        assert_eq!(rejected["error"]["code"], error_codes::INVALID_REQUEST);
    }
}
