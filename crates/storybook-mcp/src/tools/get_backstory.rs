//! Tool: get_backstory — look up a character's backstory.

use std::sync::Arc;

use storybook::CharacterTable;

use crate::registry::{Arguments, ToolHandler};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

/// Tool name.
pub const NAME: &str = "get_backstory";

/// Reply for names missing from the table.
pub const NOT_FOUND: &str = "Character not found.";

/// Return the tool definition for get_backstory.
pub fn definition(schemas: &SchemaRegistry) -> McpResult<ToolDefinition> {
    super::tool_definition(
        schemas,
        NAME,
        "Get the backstory of a character.",
        "character-input",
    )
}

/// Handler for get_backstory.
pub struct GetBackstory {
    characters: Arc<CharacterTable>,
}

impl GetBackstory {
    /// Create the tool over a shared character table.
    pub fn new(characters: Arc<CharacterTable>) -> Self {
        Self { characters }
    }
}

impl ToolHandler for GetBackstory {
    fn call(&self, args: &Arguments) -> anyhow::Result<ToolCallResult> {
        let character = super::string_arg(args, "character")?;
        let text = self.characters.backstory(character).unwrap_or(NOT_FOUND);
        Ok(ToolCallResult::text(text))
    }
}
