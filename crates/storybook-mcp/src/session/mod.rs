//! Live SSE sessions keyed by session id.

pub mod table;

pub use table::{SessionGuard, SessionLink, SessionTable};
