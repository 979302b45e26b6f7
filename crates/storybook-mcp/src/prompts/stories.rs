//! Prompts about the story library: save_story, get_story.

use crate::registry::Arguments;
use crate::types::{PromptArgument, PromptDefinition, PromptGetResult};

use super::{single_message, text_arg};

/// Definition of `save_story`.
pub fn save_story() -> PromptDefinition {
    PromptDefinition {
        name: "save_story".to_string(),
        description: "Save a story to disk.".to_string(),
        arguments: vec![
            PromptArgument::required("title", "The title of the story"),
            PromptArgument::required("content", "The content of the story"),
        ],
    }
}

/// Definition of `get_story`.
pub fn get_story() -> PromptDefinition {
    PromptDefinition {
        name: "get_story".to_string(),
        description: "Read a complete story.".to_string(),
        arguments: vec![PromptArgument::required("filename", "The file to read")],
    }
}

/// Expand `save_story`.
pub fn expand_save(args: &Arguments) -> anyhow::Result<PromptGetResult> {
    let title = text_arg(args, "title").unwrap_or_default();
    let content = text_arg(args, "content").unwrap_or_default();
    Ok(single_message(
        "Save a story to disk.",
        format!("Please save the story to disk.\n\nTitle: {title}\n\n{content}"),
    ))
}

/// Expand `get_story`.
pub fn expand_get(args: &Arguments) -> anyhow::Result<PromptGetResult> {
    let filename = text_arg(args, "filename").unwrap_or_default();
    Ok(single_message(
        "Read a complete story.",
        format!("What is the content of this story: {filename}"),
    ))
}
