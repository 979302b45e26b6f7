//! Prompt template: "Write a story featuring the cast."

use crate::registry::Arguments;
use crate::types::{PromptArgument, PromptDefinition, PromptGetResult};

use super::{single_message, text_arg};

/// Definition of `story-creator`.
pub fn definition() -> PromptDefinition {
    PromptDefinition {
        name: "story-creator".to_string(),
        description: "Create a markdown story that features every character".to_string(),
        arguments: vec![PromptArgument::optional(
            "user_query",
            "What the story should be about",
        )],
    }
}

/// Expand `story-creator`.
pub fn expand(args: &Arguments) -> anyhow::Result<PromptGetResult> {
    let request = match text_arg(args, "user_query") {
        Some(query) if !query.trim().is_empty() => format!("{query}\n\n"),
        _ => String::new(),
    };

    let text = format!(
        "{request}Based on the above prompt, create a beautiful story that includes \
         the traits and backstories of each character.\n\
         Provide the story in markdown format with an appropriate title."
    );

    Ok(single_message("Create a story featuring the characters", text))
}
