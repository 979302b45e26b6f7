//! Prompts about the cast: get_characters, get_backstory, get_superpower.

use crate::registry::Arguments;
use crate::types::{PromptArgument, PromptDefinition, PromptGetResult};

use super::{single_message, text_arg};

/// Definition of `get_characters`.
pub fn get_characters() -> PromptDefinition {
    PromptDefinition {
        name: "get_characters".to_string(),
        description: "Get all characters.".to_string(),
        arguments: Vec::new(),
    }
}

/// Definition of `get_backstory`.
pub fn get_backstory() -> PromptDefinition {
    PromptDefinition {
        name: "get_backstory".to_string(),
        description: "Get the backstory of a character.".to_string(),
        arguments: vec![PromptArgument::required(
            "character",
            "The character whose backstory is wanted",
        )],
    }
}

/// Definition of `get_superpower`.
pub fn get_superpower() -> PromptDefinition {
    PromptDefinition {
        name: "get_superpower".to_string(),
        description: "Get the superpower of a character.".to_string(),
        arguments: vec![PromptArgument::required(
            "character",
            "The character whose superpower is wanted",
        )],
    }
}

/// Expand `get_characters`.
pub fn expand_characters(_args: &Arguments) -> anyhow::Result<PromptGetResult> {
    Ok(single_message(
        "Get all characters.",
        "What are the characters of this story?".to_string(),
    ))
}

/// Expand `get_backstory`.
pub fn expand_backstory(args: &Arguments) -> anyhow::Result<PromptGetResult> {
    let character = text_arg(args, "character").unwrap_or_default();
    Ok(single_message(
        "Get the backstory of a character.",
        format!("What is the backstory of this character: {character}"),
    ))
}

/// Expand `get_superpower`.
pub fn expand_superpower(args: &Arguments) -> anyhow::Result<PromptGetResult> {
    let character = text_arg(args, "character").unwrap_or_default();
    Ok(single_message(
        "Get the superpower of a character.",
        format!("What is the superpower of this character: {character}"),
    ))
}
