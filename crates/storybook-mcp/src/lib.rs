//! Storybook MCP server: story-building tools and prompts over the Model
//! Context Protocol.
//!
//! Requests arrive on a transport (stdio or SSE), pass through a
//! per-session [`ProtocolHandler`] that enforces the `initialize`
//! handshake, and are routed by a shared [`Dispatcher`] to handlers in the
//! [`CapabilityRegistry`]. Tool arguments are validated against JSON-schema
//! documents from the [`SchemaRegistry`] before a handler runs.

pub mod config;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod schema;
pub mod server;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use protocol::{Dispatcher, ProtocolHandler};
pub use registry::CapabilityRegistry;
pub use schema::SchemaRegistry;
pub use server::{build_dispatcher, build_registry};
pub use transport::StdioTransport;

#[cfg(feature = "sse")]
pub use transport::SseTransport;
