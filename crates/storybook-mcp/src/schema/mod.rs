//! Tool input schema documents, loaded once at startup.

pub mod registry;

pub use registry::SchemaRegistry;
