//! Startup wiring: schemas + domain state → populated registry → dispatcher.

use std::sync::Arc;

use storybook::{CharacterTable, StoryLibrary};

use crate::config::ServerConfig;
use crate::prompts::register_prompts;
use crate::protocol::Dispatcher;
use crate::registry::CapabilityRegistry;
use crate::schema::SchemaRegistry;
use crate::tools::register_tools;
use crate::types::{Implementation, McpResult};

/// Build the registry with every storybook tool and prompt.
pub fn build_registry(schemas: &SchemaRegistry, library: StoryLibrary) -> McpResult<CapabilityRegistry> {
    let mut registry = CapabilityRegistry::new();
    register_tools(
        &mut registry,
        schemas,
        Arc::new(CharacterTable::builtin()),
        Arc::new(library),
    )?;
    register_prompts(&mut registry)?;
    Ok(registry)
}

/// Build the shared dispatcher for every transport session.
pub fn build_dispatcher(
    config: &ServerConfig,
    schemas: &SchemaRegistry,
    library: StoryLibrary,
) -> McpResult<Dispatcher> {
    let registry = build_registry(schemas, library)?;
    tracing::info!(
        "Serving {} tools and {} prompts",
        registry.tool_count(),
        registry.prompt_count()
    );

    Ok(Dispatcher::new(
        registry,
        Implementation {
            name: config.name.clone(),
            version: config.version.clone(),
        },
        &config.capabilities,
    ))
}
