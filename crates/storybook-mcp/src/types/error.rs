//! Error types and JSON-RPC error code mapping.

use thiserror::Error;

use super::message::{JsonRpcError, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist or is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-defined error codes for MCP-level failures.
pub mod mcp_error_codes {
    /// The requested tool is not registered.
    pub const TOOL_NOT_FOUND: i32 = -32803;
    /// The requested prompt is not registered.
    pub const PROMPT_NOT_FOUND: i32 = -32804;
}

/// Errors raised while building or looking up the capability registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool or prompt with this name is already registered.
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName {
        /// "tool" or "prompt".
        kind: &'static str,
        /// The clashing name.
        name: String,
    },

    /// No tool or prompt with this name is registered.
    #[error("Unknown {kind}: {name}")]
    NotFound {
        /// "tool" or "prompt".
        kind: &'static str,
        /// The requested name.
        name: String,
    },

    /// A tool's input schema is not a JSON object.
    #[error("Tool '{0}' has an invalid input schema: expected a JSON object")]
    InvalidSchema(String),
}

/// All errors the MCP server can produce.
#[derive(Debug, Error)]
pub enum McpError {
    /// Undecodable JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Malformed envelope or a request the session cannot accept.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Method other than `initialize` before the handshake.
    #[error("Server not initialized. Send 'initialize' first.")]
    NotInitialized,

    /// Second `initialize` on the same session.
    #[error("Invalid request: session is already initialized")]
    AlreadyInitialized,

    /// Unknown method name.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Params missing, of the wrong shape, or failing schema validation.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Unknown tool name.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Unknown prompt name.
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// Unexpected server-side failure.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Schema document missing or unusable at startup.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registry construction failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Story library failure during startup.
    #[error(transparent)]
    Story(#[from] storybook::StoryError),

    /// Transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// The JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            McpError::ParseError(_) => error_codes::PARSE_ERROR,
            McpError::InvalidRequest(_) | McpError::NotInitialized | McpError::AlreadyInitialized => {
                error_codes::INVALID_REQUEST
            }
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            McpError::ToolNotFound(_) => mcp_error_codes::TOOL_NOT_FOUND,
            McpError::PromptNotFound(_) => mcp_error_codes::PROMPT_NOT_FOUND,
            _ => error_codes::INTERNAL_ERROR,
        }
    }

    /// Convert into a JSON-RPC error response addressed to `id`.
    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError::new(id, self.code(), self.to_string())
    }
}

/// Convenience alias for server results.
pub type McpResult<T> = Result<T, McpError>;
