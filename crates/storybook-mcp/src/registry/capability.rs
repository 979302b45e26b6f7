//! Ordered, name-indexed storage of tools and prompts.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{PromptDefinition, RegistryError, ToolDefinition};

use super::handler::{PromptHandler, ToolHandler};

/// A tool definition paired with its handler.
#[derive(Clone)]
pub struct RegisteredTool {
    /// Wire-visible definition.
    pub definition: ToolDefinition,
    /// The handler invoked by `tools/call`.
    pub handler: Arc<dyn ToolHandler>,
}

/// A prompt definition paired with its handler.
#[derive(Clone)]
pub struct RegisteredPrompt {
    /// Wire-visible definition.
    pub definition: PromptDefinition,
    /// The handler invoked by `prompts/get`.
    pub handler: Arc<dyn PromptHandler>,
}

/// Registry of every tool and prompt the server exposes.
///
/// Populated at startup through `&mut self`, then shared behind an `Arc`
/// and only read, so lookups need no locking.
#[derive(Default)]
pub struct CapabilityRegistry {
    tools: Vec<RegisteredTool>,
    tool_index: HashMap<String, usize>,
    prompts: Vec<RegisteredPrompt>,
    prompt_index: HashMap<String, usize>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails on a duplicate name or a non-object schema.
    pub fn register_tool(
        &mut self,
        definition: ToolDefinition,
        handler: impl ToolHandler,
    ) -> Result<(), RegistryError> {
        if self.tool_index.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateName {
                kind: "tool",
                name: definition.name,
            });
        }
        if !definition.input_schema.is_object() {
            return Err(RegistryError::InvalidSchema(definition.name));
        }

        tracing::debug!("Registered tool '{}'", definition.name);
        self.tool_index
            .insert(definition.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            definition,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Register a prompt. Fails on a duplicate name.
    pub fn register_prompt(
        &mut self,
        definition: PromptDefinition,
        handler: impl PromptHandler,
    ) -> Result<(), RegistryError> {
        if self.prompt_index.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateName {
                kind: "prompt",
                name: definition.name,
            });
        }

        tracing::debug!("Registered prompt '{}'", definition.name);
        self.prompt_index
            .insert(definition.name.clone(), self.prompts.len());
        self.prompts.push(RegisteredPrompt {
            definition,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Tool definitions in registration order.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition.clone()).collect()
    }

    /// Prompt definitions in registration order.
    pub fn list_prompts(&self) -> Vec<PromptDefinition> {
        self.prompts.iter().map(|p| p.definition.clone()).collect()
    }

    /// Look up a tool by name.
    pub fn get_tool(&self, name: &str) -> Result<&RegisteredTool, RegistryError> {
        self.tool_index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| RegistryError::NotFound {
                kind: "tool",
                name: name.to_string(),
            })
    }

    /// Look up a prompt by name.
    pub fn get_prompt(&self, name: &str) -> Result<&RegisteredPrompt, RegistryError> {
        self.prompt_index
            .get(name)
            .map(|&i| &self.prompts[i])
            .ok_or_else(|| RegistryError::NotFound {
                kind: "prompt",
                name: name.to_string(),
            })
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Number of registered prompts.
    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }
}
