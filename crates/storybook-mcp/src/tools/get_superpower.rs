//! Tool: get_superpower — look up a character's superpower.

use std::sync::Arc;

use storybook::CharacterTable;

use crate::registry::{Arguments, ToolHandler};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::get_backstory::NOT_FOUND;

/// Tool name.
pub const NAME: &str = "get_superpower";

/// Return the tool definition for get_superpower.
pub fn definition(schemas: &SchemaRegistry) -> McpResult<ToolDefinition> {
    super::tool_definition(
        schemas,
        NAME,
        "Get the superpower of a character.",
        "character-input",
    )
}

/// Handler for get_superpower.
pub struct GetSuperpower {
    characters: Arc<CharacterTable>,
}

impl GetSuperpower {
    /// Create the tool over a shared character table.
    pub fn new(characters: Arc<CharacterTable>) -> Self {
        Self { characters }
    }
}

impl ToolHandler for GetSuperpower {
    fn call(&self, args: &Arguments) -> anyhow::Result<ToolCallResult> {
        let character = super::string_arg(args, "character")?;
        let text = self.characters.superpower(character).unwrap_or(NOT_FOUND);
        Ok(ToolCallResult::text(text))
    }
}
