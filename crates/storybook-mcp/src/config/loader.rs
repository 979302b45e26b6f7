//! TOML configuration file plus CLI/environment overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{McpError, McpResult, SERVER_NAME, SERVER_VERSION};

/// Default listen address for the SSE transport.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8282";

/// Environment variable overriding the schema directory.
pub const SCHEMA_DIR_ENV: &str = "STORYBOOK_SCHEMA_DIR";

/// Environment variable overriding the story directory.
pub const STORY_DIR_ENV: &str = "STORYBOOK_STORY_DIR";

/// Schema documents shipped with the crate.
const BUNDLED_SCHEMA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/schemas");

/// Server configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server display name reported during initialization.
    pub name: String,
    /// Server version reported during initialization.
    pub version: String,
    /// Listen address for the SSE transport.
    pub addr: String,
    /// Directory of tool input schema documents.
    pub schema_dir: Option<PathBuf>,
    /// Directory stories are saved to and read from.
    pub story_dir: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    /// Which capabilities may be advertised.
    pub capabilities: CapabilitySettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            addr: DEFAULT_ADDR.to_string(),
            schema_dir: None,
            story_dir: None,
            log_level: None,
            capabilities: CapabilitySettings::default(),
        }
    }
}

/// Capability switches from the `[capabilities]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySettings {
    /// Advertise and serve tools.
    pub tools: bool,
    /// Advertise and serve prompts.
    pub prompts: bool,
    /// Advertise resources (the listing is always empty).
    pub resources: bool,
}

impl Default for CapabilitySettings {
    fn default() -> Self {
        Self {
            tools: true,
            prompts: true,
            resources: false,
        }
    }
}

/// Load configuration from an optional TOML file.
pub fn load_config(path: Option<&str>) -> McpResult<ServerConfig> {
    let Some(path) = path else {
        return Ok(ServerConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| McpError::Config(format!("cannot read config file {path}: {e}")))?;
    let config = parse_config(&text)?;
    tracing::debug!("Loaded configuration from {path}");
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> McpResult<ServerConfig> {
    toml::from_str(text).map_err(|e| McpError::Config(e.to_string()))
}

/// Resolve the schema directory: CLI flag, then environment, then config
/// file, then the bundled `schemas/` directory.
pub fn resolve_schema_dir(explicit: Option<&str>, config: &ServerConfig) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(SCHEMA_DIR_ENV).map(PathBuf::from))
        .or_else(|| config.schema_dir.clone())
        .unwrap_or_else(|| PathBuf::from(BUNDLED_SCHEMA_DIR))
}

/// Resolve the story directory: CLI flag, then environment, then config
/// file, then the current directory.
pub fn resolve_story_dir(explicit: Option<&str>, config: &ServerConfig) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(STORY_DIR_ENV).map(PathBuf::from))
        .or_else(|| config.story_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}
