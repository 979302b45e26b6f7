//! Capability registry: registration order, duplicates, lookups.

use serde_json::json;

use storybook_mcp::registry::{prompt_fn, tool_fn, CapabilityRegistry, ToolHandler};
use storybook_mcp::types::{
    PromptDefinition, PromptGetResult, PromptMessage, RegistryError, ToolCallResult,
    ToolDefinition,
};

fn tool(name: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: format!("{name} tool"),
        input_schema: json!({"type": "object"}),
    }
}

fn prompt(name: &str) -> PromptDefinition {
    PromptDefinition {
        name: name.to_string(),
        description: format!("{name} prompt"),
        arguments: Vec::new(),
    }
}

#[test]
fn test_tools_listed_in_registration_order() {
    let mut registry = CapabilityRegistry::new();
    for name in ["zeta", "alpha", "mid"] {
        registry
            .register_tool(tool(name), tool_fn(|_| Ok(ToolCallResult::text("ok"))))
            .unwrap();
    }

    let names: Vec<_> = registry.list_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert_eq!(registry.tool_count(), 3);
}

#[test]
fn test_duplicate_tool_rejected() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_tool(tool("dup"), tool_fn(|_| Ok(ToolCallResult::text("first"))))
        .unwrap();

    let err = registry
        .register_tool(tool("dup"), tool_fn(|_| Ok(ToolCallResult::text("second"))))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateName {
            kind: "tool",
            name: "dup".to_string()
        }
    );
    assert_eq!(registry.tool_count(), 1);
}

#[test]
fn test_non_object_schema_rejected() {
    let mut registry = CapabilityRegistry::new();
    let mut definition = tool("bad");
    definition.input_schema = json!("object");

    let err = registry
        .register_tool(definition, tool_fn(|_| Ok(ToolCallResult::text("ok"))))
        .unwrap_err();
    assert_eq!(err, RegistryError::InvalidSchema("bad".to_string()));
}

#[test]
fn test_lookup_and_invoke() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_tool(
            tool("echo"),
            tool_fn(|args| Ok(ToolCallResult::text(args["word"].to_string()))),
        )
        .unwrap();

    let echo = registry.get_tool("echo").unwrap();
    let mut args = serde_json::Map::new();
    args.insert("word".to_string(), json!("hi"));
    let result = echo.handler.call(&args).unwrap();
    assert_eq!(result.text_content(), "\"hi\"");

    assert!(matches!(
        registry.get_tool("missing"),
        Err(RegistryError::NotFound { kind: "tool", .. })
    ));
}

#[test]
fn test_prompts_registered_separately_from_tools() {
    let mut registry = CapabilityRegistry::new();
    registry
        .register_tool(tool("shared"), tool_fn(|_| Ok(ToolCallResult::text("ok"))))
        .unwrap();
    registry
        .register_prompt(
            prompt("shared"),
            prompt_fn(|_| {
                Ok(PromptGetResult {
                    description: None,
                    messages: vec![PromptMessage::user("hi")],
                })
            }),
        )
        .unwrap();

    assert!(registry.register_prompt(prompt("shared"), prompt_fn(|_| anyhow::bail!("unused"))).is_err());
    assert_eq!(registry.prompt_count(), 1);
    assert!(registry.get_prompt("shared").is_ok());
    assert!(registry.get_prompt("other").is_err());
}
