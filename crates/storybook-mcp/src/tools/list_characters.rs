//! Tool: list_characters — names of every known character.

use std::sync::Arc;

use storybook::CharacterTable;

use crate::registry::{Arguments, ToolHandler};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

/// Tool name.
pub const NAME: &str = "list_characters";

/// Return the tool definition for list_characters.
pub fn definition(schemas: &SchemaRegistry) -> McpResult<ToolDefinition> {
    super::tool_definition(schemas, NAME, "List all characters.", "empty-input")
}

/// Handler for list_characters.
pub struct ListCharacters {
    characters: Arc<CharacterTable>,
}

impl ListCharacters {
    /// Create the tool over a shared character table.
    pub fn new(characters: Arc<CharacterTable>) -> Self {
        Self { characters }
    }
}

impl ToolHandler for ListCharacters {
    fn call(&self, _args: &Arguments) -> anyhow::Result<ToolCallResult> {
        if self.characters.is_empty() {
            return Ok(ToolCallResult::text("No characters"));
        }
        Ok(ToolCallResult::text(self.characters.names().join("\n")))
    }
}
