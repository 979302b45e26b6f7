//! Request routing: tools and prompts lookup, argument checks, handler
//! invocation, result wrapping.

use std::any::Any;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::task::JoinError;

use crate::config::CapabilitySettings;
use crate::registry::{Arguments, CapabilityRegistry};
use crate::types::{
    Implementation, InitializeResult, McpError, McpResult, PromptGetParams, PromptGetResult,
    PromptListResult, ResourceListResult, ResourceTemplateListResult, ServerCapabilities,
    ToolCallParams, ToolCallResult, ToolListResult, SERVER_NAME, SERVER_VERSION,
};

use super::validator;

const INSTRUCTIONS: &str = "Storybook MCP server for building stories. \
     Use tools to look up characters and to save, list, and read markdown stories. \
     Use prompts for guided story-building requests.";

/// Routes initialized-session requests to the capability registry.
///
/// Shared by every session of every transport; holds no per-session state.
pub struct Dispatcher {
    registry: Arc<CapabilityRegistry>,
    server_info: Implementation,
    capabilities: ServerCapabilities,
}

impl Dispatcher {
    /// Build a dispatcher over a fully populated registry.
    ///
    /// Tools and prompts are advertised only when enabled in `settings`
    /// and at least one of them is registered.
    pub fn new(
        registry: CapabilityRegistry,
        server_info: Implementation,
        settings: &CapabilitySettings,
    ) -> Self {
        let capabilities = ServerCapabilities::advertise(
            settings.tools && registry.tool_count() > 0,
            settings.prompts && registry.prompt_count() > 0,
            settings.resources,
        );

        Self {
            registry: Arc::new(registry),
            server_info,
            capabilities,
        }
    }

    /// Dispatcher with the default server identity and capability settings.
    pub fn from_registry(registry: CapabilityRegistry) -> Self {
        Self::new(
            registry,
            Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            &CapabilitySettings::default(),
        )
    }

    /// The registry being served.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Server identity reported during initialization.
    pub fn server_info(&self) -> &Implementation {
        &self.server_info
    }

    /// Capabilities advertised during initialization.
    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }

    /// The `initialize` result for an agreed protocol version.
    pub fn initialize_result(&self, protocol_version: &str) -> InitializeResult {
        InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: self.capabilities.clone(),
            server_info: self.server_info.clone(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    /// Route one capability method. The session must already be initialized;
    /// `initialize` and `ping` belong to [`ProtocolHandler`](super::ProtocolHandler).
    pub async fn dispatch(&self, method: &str, params: Option<Value>) -> McpResult<Value> {
        match method {
            "tools/list" if self.capabilities.supports_tools() => {
                Ok(serde_json::to_value(self.list_tools())?)
            }
            "tools/call" if self.capabilities.supports_tools() => {
                let params: ToolCallParams = parse_params(params)?;
                let result = self.call_tool(&params.name, params.arguments).await?;
                Ok(serde_json::to_value(result)?)
            }

            "prompts/list" if self.capabilities.supports_prompts() => {
                Ok(serde_json::to_value(self.list_prompts())?)
            }
            "prompts/get" if self.capabilities.supports_prompts() => {
                let params: PromptGetParams = parse_params(params)?;
                let result = self.get_prompt(&params.name, params.arguments).await?;
                Ok(serde_json::to_value(result)?)
            }

            "resources/list" if self.capabilities.supports_resources() => {
                Ok(serde_json::to_value(ResourceListResult {
                    resources: Vec::new(),
                    next_cursor: None,
                })?)
            }
            "resources/templates/list" if self.capabilities.supports_resources() => {
                Ok(serde_json::to_value(ResourceTemplateListResult {
                    resource_templates: Vec::new(),
                    next_cursor: None,
                })?)
            }

            _ => Err(McpError::MethodNotFound(method.to_string())),
        }
    }

    /// Every registered tool, in registration order.
    pub fn list_tools(&self) -> ToolListResult {
        ToolListResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        }
    }

    /// Every registered prompt, in registration order.
    pub fn list_prompts(&self) -> PromptListResult {
        PromptListResult {
            prompts: self.registry.list_prompts(),
            next_cursor: None,
        }
    }

    /// Validate arguments and run a tool.
    ///
    /// Unknown tools and schema violations are protocol errors and the
    /// handler never runs. Handler failures and panics come back as a
    /// result with `is_error` set.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> McpResult<ToolCallResult> {
        let tool = self
            .registry
            .get_tool(name)
            .map_err(|_| McpError::ToolNotFound(name.to_string()))?;

        let args = arguments_or_empty(arguments);
        if let Err(errors) = validator::validate(&tool.definition.input_schema, &args) {
            return Err(McpError::InvalidParams(format!(
                "Invalid arguments for tool '{name}': {}",
                validator::describe(&errors)
            )));
        }
        let args = into_object(args)?;

        let handler = Arc::clone(&tool.handler);
        tracing::debug!("Calling tool '{name}'");
        let outcome = tokio::task::spawn_blocking(move || handler.call(&args)).await;

        Ok(match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(fault)) => {
                tracing::error!("Tool '{name}' failed: {fault:#}");
                ToolCallResult::error(format!("Error executing tool '{name}': {fault:#}"))
            }
            Err(join_error) => {
                let reason = join_failure(join_error);
                tracing::error!("Tool '{name}' aborted: {reason}");
                ToolCallResult::error(format!("Error executing tool '{name}': {reason}"))
            }
        })
    }

    /// Check required arguments and render a prompt.
    ///
    /// Declared arguments the client omitted are passed as `null`.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> McpResult<PromptGetResult> {
        let prompt = self
            .registry
            .get_prompt(name)
            .map_err(|_| McpError::PromptNotFound(name.to_string()))?;

        let mut supplied = into_object(arguments_or_empty(arguments))?;
        let mut args = Arguments::new();
        let mut missing = Vec::new();
        for declared in &prompt.definition.arguments {
            let value = supplied.remove(&declared.name).unwrap_or(Value::Null);
            if declared.required && value.is_null() {
                missing.push(declared.name.as_str());
            }
            args.insert(declared.name.clone(), value);
        }
        if !missing.is_empty() {
            return Err(McpError::InvalidParams(format!(
                "Missing required argument(s) for prompt '{name}': {}",
                missing.join(", ")
            )));
        }
        args.extend(supplied);

        let handler = Arc::clone(&prompt.handler);
        match tokio::task::spawn_blocking(move || handler.render(&args)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(fault)) => Err(McpError::InternalError(format!(
                "Prompt '{name}' failed: {fault:#}"
            ))),
            Err(join_error) => Err(McpError::InternalError(format!(
                "Prompt '{name}' failed: {}",
                join_failure(join_error)
            ))),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> McpResult<T> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn arguments_or_empty(arguments: Option<Value>) -> Value {
    match arguments {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    }
}

fn into_object(arguments: Value) -> McpResult<Map<String, Value>> {
    match arguments {
        Value::Object(map) => Ok(map),
        other => Err(McpError::InvalidParams(format!(
            "'arguments' must be a JSON object, found {other}"
        ))),
    }
}

fn join_failure(error: JoinError) -> String {
    if error.is_panic() {
        format!("handler panicked: {}", panic_message(error.into_panic()))
    } else {
        "handler was cancelled".to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
