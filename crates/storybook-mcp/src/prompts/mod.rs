//! Prompt templates for story-building conversations.

pub mod characters;
pub mod greeting;
pub mod stories;
pub mod story_creator;

use serde_json::Value;

use crate::registry::{Arguments, CapabilityRegistry};
use crate::types::{McpResult, PromptGetResult, PromptMessage};

/// Register every prompt, in listing order.
pub fn register_prompts(registry: &mut CapabilityRegistry) -> McpResult<()> {
    registry.register_prompt(characters::get_characters(), characters::expand_characters)?;
    registry.register_prompt(characters::get_backstory(), characters::expand_backstory)?;
    registry.register_prompt(characters::get_superpower(), characters::expand_superpower)?;
    registry.register_prompt(stories::save_story(), stories::expand_save)?;
    registry.register_prompt(stories::get_story(), stories::expand_get)?;
    registry.register_prompt(greeting::definition(), greeting::expand)?;
    registry.register_prompt(story_creator::definition(), story_creator::expand)?;

    tracing::debug!("Registered {} prompts", registry.prompt_count());
    Ok(())
}

/// Text form of an argument: strings verbatim, other JSON rendered,
/// `None` for absent or null.
fn text_arg(args: &Arguments, name: &str) -> Option<String> {
    match args.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn single_message(description: &str, text: String) -> PromptGetResult {
    PromptGetResult {
        description: Some(description.to_string()),
        messages: vec![PromptMessage::user(text)],
    }
}
