//! Tool: list_stories — file names of every saved story.

use std::sync::Arc;

use storybook::StoryLibrary;

use crate::registry::{Arguments, ToolHandler};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

/// Tool name.
pub const NAME: &str = "list_stories";

/// Return the tool definition for list_stories.
pub fn definition(schemas: &SchemaRegistry) -> McpResult<ToolDefinition> {
    super::tool_definition(schemas, NAME, "List saved story files.", "empty-input")
}

/// Handler for list_stories.
pub struct ListStories {
    library: Arc<StoryLibrary>,
}

impl ListStories {
    /// Create the tool over a shared story library.
    pub fn new(library: Arc<StoryLibrary>) -> Self {
        Self { library }
    }
}

impl ToolHandler for ListStories {
    fn call(&self, _args: &Arguments) -> anyhow::Result<ToolCallResult> {
        let stories = self.library.list()?;
        if stories.is_empty() {
            return Ok(ToolCallResult::text("No stories"));
        }
        Ok(ToolCallResult::text(stories.join("\n")))
    }
}
