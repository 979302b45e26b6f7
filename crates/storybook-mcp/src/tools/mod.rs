//! Storybook tools: character lookups and the story library.

pub mod get_backstory;
pub mod get_story;
pub mod get_superpower;
pub mod list_characters;
pub mod list_stories;
pub mod save_story;

use std::sync::Arc;

use anyhow::anyhow;
use storybook::{CharacterTable, StoryLibrary};

use crate::registry::{Arguments, CapabilityRegistry};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolDefinition};

/// Register every storybook tool, in listing order.
pub fn register_tools(
    registry: &mut CapabilityRegistry,
    schemas: &SchemaRegistry,
    characters: Arc<CharacterTable>,
    library: Arc<StoryLibrary>,
) -> McpResult<()> {
    registry.register_tool(
        list_characters::definition(schemas)?,
        list_characters::ListCharacters::new(Arc::clone(&characters)),
    )?;
    registry.register_tool(
        get_backstory::definition(schemas)?,
        get_backstory::GetBackstory::new(Arc::clone(&characters)),
    )?;
    registry.register_tool(
        get_superpower::definition(schemas)?,
        get_superpower::GetSuperpower::new(characters),
    )?;
    registry.register_tool(
        save_story::definition(schemas)?,
        save_story::SaveStory::new(Arc::clone(&library)),
    )?;
    registry.register_tool(
        get_story::definition(schemas)?,
        get_story::GetStory::new(Arc::clone(&library)),
    )?;
    registry.register_tool(
        list_stories::definition(schemas)?,
        list_stories::ListStories::new(library),
    )?;

    tracing::debug!("Registered {} tools", registry.tool_count());
    Ok(())
}

fn tool_definition(
    schemas: &SchemaRegistry,
    name: &str,
    description: &str,
    schema: &str,
) -> McpResult<ToolDefinition> {
    Ok(ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: schemas.get(schema)?.clone(),
    })
}

/// Fetch a string argument. Validation has already run, so a miss here
/// means the schema and the handler disagree.
fn string_arg<'a>(args: &'a Arguments, name: &str) -> anyhow::Result<&'a str> {
    args.get(name)
        .and_then(|value| value.as_str())
        .ok_or_else(|| anyhow!("'{name}' must be a string"))
}
