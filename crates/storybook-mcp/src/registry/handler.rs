//! Handler contracts consumed from domain logic.

use serde_json::{Map, Value};

use crate::types::{PromptGetResult, ToolCallResult};

/// Argument name → value mapping handed to handlers.
pub type Arguments = Map<String, Value>;

/// Executes one tool.
///
/// Arguments have already been validated against the tool's input schema.
/// An `Err` is a domain-level fault: the dispatcher reports it to the
/// client as a result with `isError` set, never as a protocol error.
/// Handlers may block on I/O; they run on the blocking thread pool.
pub trait ToolHandler: Send + Sync + 'static {
    /// Run the tool.
    fn call(&self, args: &Arguments) -> anyhow::Result<ToolCallResult>;
}

impl<F> ToolHandler for F
where
    F: Fn(&Arguments) -> anyhow::Result<ToolCallResult> + Send + Sync + 'static,
{
    fn call(&self, args: &Arguments) -> anyhow::Result<ToolCallResult> {
        self(args)
    }
}

/// Renders one prompt.
///
/// Every declared argument is present in `args`; optional arguments the
/// client omitted are `null`, and the handler decides their default.
pub trait PromptHandler: Send + Sync + 'static {
    /// Expand the prompt into messages.
    fn render(&self, args: &Arguments) -> anyhow::Result<PromptGetResult>;
}

impl<F> PromptHandler for F
where
    F: Fn(&Arguments) -> anyhow::Result<PromptGetResult> + Send + Sync + 'static,
{
    fn render(&self, args: &Arguments) -> anyhow::Result<PromptGetResult> {
        self(args)
    }
}

/// Pin a closure to the [`ToolHandler`] signature so its argument and
/// return types are inferred.
pub fn tool_fn<F>(f: F) -> F
where
    F: Fn(&Arguments) -> anyhow::Result<ToolCallResult> + Send + Sync + 'static,
{
    f
}

/// Pin a closure to the [`PromptHandler`] signature so its argument and
/// return types are inferred.
pub fn prompt_fn<F>(f: F) -> F
where
    F: Fn(&Arguments) -> anyhow::Result<PromptGetResult> + Send + Sync + 'static,
{
    f
}
