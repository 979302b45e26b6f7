//! Tool: get_story — read a saved story back.

use std::sync::Arc;

use storybook::StoryLibrary;

use crate::registry::{Arguments, ToolHandler};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

/// Tool name.
pub const NAME: &str = "get_story";

/// Return the tool definition for get_story.
pub fn definition(schemas: &SchemaRegistry) -> McpResult<ToolDefinition> {
    super::tool_definition(
        schemas,
        NAME,
        "Read the complete markdown of a saved story.",
        "filename-input",
    )
}

/// Handler for get_story.
pub struct GetStory {
    library: Arc<StoryLibrary>,
}

impl GetStory {
    /// Create the tool over a shared story library.
    pub fn new(library: Arc<StoryLibrary>) -> Self {
        Self { library }
    }
}

impl ToolHandler for GetStory {
    fn call(&self, args: &Arguments) -> anyhow::Result<ToolCallResult> {
        let filename = super::string_arg(args, "filename")?;
        Ok(ToolCallResult::text(self.library.read(filename)?))
    }
}
