//! Per-session front door: decodes envelopes, enforces the handshake,
//! hands requests to the shared [`Dispatcher`], and frames responses.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::{
    error_codes, parse_message, InitializeParams, JsonRpcMessage, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, McpError, McpResult, JSONRPC_VERSION,
};

use super::dispatcher::Dispatcher;
use super::negotiation::{NegotiatedCapabilities, SessionState};

/// One client session's protocol state machine.
///
/// Safe to share across tasks: concurrent requests on the same session
/// are handled independently.
pub struct ProtocolHandler {
    dispatcher: Arc<Dispatcher>,
    session: Mutex<NegotiatedCapabilities>,
}

impl ProtocolHandler {
    /// Start a new, unstarted session over a shared dispatcher.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            session: Mutex::new(NegotiatedCapabilities::new()),
        }
    }

    /// The shared dispatcher.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Snapshot of the negotiated session state.
    pub fn negotiated(&self) -> NegotiatedCapabilities {
        self.lock().clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    /// Whether the transport connection has ended.
    pub fn is_closed(&self) -> bool {
        self.state() == SessionState::Closed
    }

    /// Mark the session closed; later messages get no response.
    pub fn close(&self) {
        self.lock().close();
    }

    /// Decode one wire frame and handle it.
    ///
    /// Decode failures produce an error response (addressed to the
    /// recovered id, or `null`) instead of ending the session.
    pub async fn handle_text(&self, text: &str) -> Option<Value> {
        match parse_message(text) {
            Ok(message) => self.handle_message(message).await,
            Err(error) => {
                tracing::warn!("Undecodable message: {}", error.error.message);
                if self.is_closed() {
                    return None;
                }
                Some(encode(&error))
            }
        }
    }

    /// Handle a decoded message, returning the response envelope if one
    /// is due.
    pub async fn handle_message(&self, message: JsonRpcMessage) -> Option<Value> {
        if self.is_closed() {
            tracing::debug!("Ignoring message on closed session");
            return None;
        }

        match message {
            JsonRpcMessage::Request(request) => {
                let id = request.id.clone();
                let response = self.handle_request(request).await;
                if self.is_closed() {
                    tracing::warn!("Session closed while request {id} was in flight; dropping its response");
                    return None;
                }
                Some(response)
            }
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification);
                None
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::Error(_) => {
                tracing::debug!("Ignoring client-sent response");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();
        tracing::debug!("Request {id}: {}", request.method);

        match self.route(request).await {
            Ok(result) => encode(&JsonRpcResponse::new(id, result)),
            Err(error) => {
                tracing::debug!("Request {id} failed: {error}");
                encode(&error.to_json_rpc_error(id))
            }
        }
    }

    async fn route(&self, request: JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams =
                    serde_json::from_value(request.params.unwrap_or(Value::Null))
                        .map_err(|e| McpError::InvalidParams(e.to_string()))?;
                let version = self.lock().negotiate(params)?;
                Ok(serde_json::to_value(self.dispatcher.initialize_result(version))?)
            }
            // Liveness checks are answered in any state.
            "ping" => Ok(json!({})),
            method => {
                self.lock().ensure_initialized()?;
                self.dispatcher.dispatch(method, request.params).await
            }
        }
    }

    fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                tracing::info!("MCP handshake complete");
            }
            other => tracing::debug!("Ignoring notification '{other}'"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NegotiatedCapabilities> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn encode<T: Serialize>(envelope: &T) -> Value {
    serde_json::to_value(envelope).unwrap_or_else(|e| {
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": null,
            "error": {
                "code": error_codes::INTERNAL_ERROR,
                "message": format!("Failed to encode response: {e}"),
            }
        })
    })
}
