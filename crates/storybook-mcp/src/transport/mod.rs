//! Transport adapters: line-delimited stdio and HTTP Server-Sent Events.

#[cfg(feature = "sse")]
pub mod sse;
pub mod stdio;

#[cfg(feature = "sse")]
pub use sse::SseTransport;
pub use stdio::StdioTransport;
