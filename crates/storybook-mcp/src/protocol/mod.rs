//! MCP protocol layer — message handling, dispatch, validation, and capability negotiation.

pub mod dispatcher;
pub mod handler;
pub mod negotiation;
pub mod validator;

pub use dispatcher::Dispatcher;
pub use handler::ProtocolHandler;
pub use negotiation::{NegotiatedCapabilities, SessionState};
