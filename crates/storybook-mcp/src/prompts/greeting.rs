//! Prompt template: a personalised greeting.

use crate::registry::Arguments;
use crate::types::{PromptArgument, PromptDefinition, PromptGetResult};

use super::{single_message, text_arg};

/// Name used when the client supplies none.
pub const DEFAULT_NAME: &str = "friend";

/// Definition of `greeting`.
pub fn definition() -> PromptDefinition {
    PromptDefinition {
        name: "greeting".to_string(),
        description: "A friendly greeting prompt".to_string(),
        arguments: vec![PromptArgument::optional("name", "The name to greet")],
    }
}

/// Expand `greeting`.
pub fn expand(args: &Arguments) -> anyhow::Result<PromptGetResult> {
    let name = text_arg(args, "name").unwrap_or_else(|| DEFAULT_NAME.to_string());
    Ok(single_message(
        "A personalized greeting message",
        format!("Hello {name}! How can I assist you today?"),
    ))
}
