//! Capability registry — the tools and prompts a server exposes.

pub mod capability;
pub mod handler;

pub use capability::{CapabilityRegistry, RegisteredPrompt, RegisteredTool};
pub use handler::{prompt_fn, tool_fn, Arguments, PromptHandler, ToolHandler};
