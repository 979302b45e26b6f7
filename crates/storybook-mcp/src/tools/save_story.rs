//! Tool: save_story — write a markdown story into the library.

use std::sync::Arc;

use storybook::StoryLibrary;

use crate::registry::{Arguments, ToolHandler};
use crate::schema::SchemaRegistry;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

/// Tool name.
pub const NAME: &str = "save_story";

/// Return the tool definition for save_story.
pub fn definition(schemas: &SchemaRegistry) -> McpResult<ToolDefinition> {
    super::tool_definition(
        schemas,
        NAME,
        "Save a story as a markdown file. The file name is derived from the title.",
        "title-content-input",
    )
}

/// Handler for save_story.
pub struct SaveStory {
    library: Arc<StoryLibrary>,
}

impl SaveStory {
    /// Create the tool over a shared story library.
    pub fn new(library: Arc<StoryLibrary>) -> Self {
        Self { library }
    }
}

impl ToolHandler for SaveStory {
    fn call(&self, args: &Arguments) -> anyhow::Result<ToolCallResult> {
        let title = super::string_arg(args, "title")?;
        let content = super::string_arg(args, "content")?;

        let path = self.library.save(title, content)?;
        Ok(ToolCallResult::text(format!(
            "Story has been saved at: {}",
            path.display()
        )))
    }
}
