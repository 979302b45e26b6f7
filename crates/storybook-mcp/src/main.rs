//! Storybook MCP Server — entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use storybook::StoryLibrary;
use storybook_mcp::config::{load_config, resolve_schema_dir, resolve_story_dir, ServerConfig};
use storybook_mcp::schema::SchemaRegistry;
use storybook_mcp::server::{build_dispatcher, build_registry};
use storybook_mcp::transport::StdioTransport;
use storybook_mcp::types::MCP_VERSION;
use storybook_mcp::Dispatcher;

#[derive(Parser)]
#[command(
    name = "storybook-mcp",
    about = "MCP server for building stories from a cast of characters",
    version
)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory of tool input schema documents.
    #[arg(long, global = true)]
    schemas: Option<String>,

    /// Directory stories are saved to.
    #[arg(long, global = true)]
    stories: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Start MCP server over SSE (HTTP).
    #[cfg(feature = "sse")]
    ServeHttp {
        /// Listen address (defaults to the configured address).
        #[arg(long)]
        addr: Option<String>,
    },

    /// Load schemas and build the registry, then report what would be served.
    Validate,

    /// Print server identity, capabilities, tools, and prompts as JSON.
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.as_ref().unwrap_or(&Commands::Serve) {
        Commands::Serve => {
            let dispatcher = open_dispatcher(&cli, &config)?;
            let transport = StdioTransport::new(Arc::new(dispatcher));
            transport.run().await?;
        }

        #[cfg(feature = "sse")]
        Commands::ServeHttp { addr } => {
            let addr = addr.clone().unwrap_or_else(|| config.addr.clone());
            let dispatcher = open_dispatcher(&cli, &config)?;
            let transport = storybook_mcp::transport::SseTransport::new(Arc::new(dispatcher));
            transport.run(&addr).await?;
        }

        Commands::Validate => {
            let schema_dir = resolve_schema_dir(cli.schemas.as_deref(), &config);
            let schemas = SchemaRegistry::load_dir(&schema_dir)?;
            let story_dir = resolve_story_dir(cli.stories.as_deref(), &config);
            let library = StoryLibrary::open(&story_dir)?;
            let registry = build_registry(&schemas, library)?;

            println!("Schemas: {} ({})", schema_dir.display(), schemas.names().join(", "));
            println!("Stories: {}", story_dir.display());
            println!("Tools:   {}", registry.tool_count());
            println!("Prompts: {}", registry.prompt_count());
        }

        Commands::Info => {
            let dispatcher = open_dispatcher(&cli, &config)?;
            let initialize = dispatcher.initialize_result(MCP_VERSION);
            let tools = dispatcher.registry().list_tools();
            let prompts = dispatcher.registry().list_prompts();

            let info = serde_json::json!({
                "server": initialize.server_info,
                "protocol_version": initialize.protocol_version,
                "capabilities": initialize.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
                "prompts": prompts.iter().map(|p| &p.name).collect::<Vec<_>>(),
                "prompt_count": prompts.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

fn open_dispatcher(cli: &Cli, config: &ServerConfig) -> anyhow::Result<Dispatcher> {
    let schemas = SchemaRegistry::load_dir(resolve_schema_dir(cli.schemas.as_deref(), config))?;
    let library = StoryLibrary::open(resolve_story_dir(cli.stories.as_deref(), config))?;
    Ok(build_dispatcher(config, &schemas, library)?)
}
