//! MCP capability negotiation during initialization.

use crate::types::{
    negotiate_version, ClientCapabilities, Implementation, InitializeParams, McpError, McpResult,
};

/// Lifecycle of one client session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for `initialize`.
    #[default]
    Unstarted,
    /// Handshake done; normal traffic accepted.
    Initialized,
    /// Transport connection ended; nothing more is answered.
    Closed,
}

/// Per-session handshake state.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedCapabilities {
    state: SessionState,
    /// The client's declared capabilities.
    pub client: ClientCapabilities,
    /// The client's identity, once initialized.
    pub client_info: Option<Implementation>,
    /// The agreed protocol version, once initialized.
    pub protocol_version: Option<String>,
}

impl NegotiatedCapabilities {
    /// A fresh, unstarted session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Process an initialize request and return the agreed protocol version.
    ///
    /// A second `initialize` is rejected and leaves the negotiated state as
    /// it was.
    pub fn negotiate(&mut self, params: InitializeParams) -> McpResult<&'static str> {
        match self.state {
            SessionState::Unstarted => {}
            SessionState::Initialized => return Err(McpError::AlreadyInitialized),
            SessionState::Closed => {
                return Err(McpError::InvalidRequest("session is closed".to_string()))
            }
        }

        let version = negotiate_version(&params.protocol_version);
        if version != params.protocol_version {
            tracing::warn!(
                "Client requested protocol version {}, server supports {}. Proceeding with server version.",
                params.protocol_version,
                version
            );
        }

        tracing::info!(
            "Initialized with client: {} v{} (protocol {version})",
            params.client_info.name,
            params.client_info.version
        );

        self.client = params.capabilities;
        self.client_info = Some(params.client_info);
        self.protocol_version = Some(version.to_string());
        self.state = SessionState::Initialized;

        Ok(version)
    }

    /// Check that the handshake is complete before processing requests.
    pub fn ensure_initialized(&self) -> McpResult<()> {
        match self.state {
            SessionState::Initialized => Ok(()),
            SessionState::Unstarted => Err(McpError::NotInitialized),
            SessionState::Closed => Err(McpError::InvalidRequest("session is closed".to_string())),
        }
    }

    /// Mark the session closed. Idempotent.
    pub fn close(&mut self) {
        if self.state != SessionState::Closed {
            tracing::debug!("Session closed");
        }
        self.state = SessionState::Closed;
    }
}
