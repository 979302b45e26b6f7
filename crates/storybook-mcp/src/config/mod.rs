//! Configuration loading and resolution.

pub mod loader;

pub use loader::{
    load_config, parse_config, resolve_schema_dir, resolve_story_dir, CapabilitySettings,
    ServerConfig,
};
