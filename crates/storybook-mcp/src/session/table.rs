//! Session table: session id → outbound event channel plus protocol state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::mpsc;

use crate::protocol::{Dispatcher, ProtocolHandler};

/// Capacity of each session's outbound event queue.
const OUTBOUND_CAPACITY: usize = 64;

/// Everything a POST needs to reach one session.
#[derive(Clone)]
pub struct SessionLink {
    /// Session id handed to the client in the `endpoint` event.
    pub id: String,
    /// The session's protocol state machine.
    pub handler: Arc<ProtocolHandler>,
    outbound: mpsc::Sender<Value>,
}

impl SessionLink {
    /// Push a response envelope onto the session's event stream.
    ///
    /// Returns `false` when the stream has already gone away.
    pub async fn deliver(&self, envelope: Value) -> bool {
        match self.outbound.send(envelope).await {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    "Session {} disconnected before its response was delivered",
                    self.id
                );
                false
            }
        }
    }
}

/// All open SSE sessions, under a single mutex.
///
/// Cloning shares the same table.
#[derive(Clone, Default)]
pub struct SessionTable {
    inner: Arc<Mutex<HashMap<String, SessionLink>>>,
}

impl SessionTable {
    /// Create an empty table with no open sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session with a fresh id.
    ///
    /// Returns the id, the receiving end of its event queue, and a guard
    /// that closes the session when dropped.
    pub fn open(&self, dispatcher: Arc<Dispatcher>) -> (String, mpsc::Receiver<Value>, SessionGuard) {
        let id = uuid::Uuid::new_v4().to_string();
        let (outbound, events) = mpsc::channel(OUTBOUND_CAPACITY);
        let link = SessionLink {
            id: id.clone(),
            handler: Arc::new(ProtocolHandler::new(dispatcher)),
            outbound,
        };

        self.lock().insert(id.clone(), link);
        tracing::info!("SSE session {id} opened");

        let guard = SessionGuard {
            table: self.clone(),
            id: id.clone(),
        };
        (id, events, guard)
    }

    /// Look up an open session.
    pub fn get(&self, id: &str) -> Option<SessionLink> {
        self.lock().get(id).cloned()
    }

    /// Remove a session and close its protocol state. Idempotent.
    pub fn close(&self, id: &str) {
        let removed = self.lock().remove(id);
        if let Some(link) = removed {
            link.handler.close();
            tracing::info!("SSE session {id} closed");
        }
    }

    /// Whether a session id is currently open.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no sessions are open.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionLink>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Closes its session when dropped. Owned by the session's event stream.
pub struct SessionGuard {
    table: SessionTable,
    id: String,
}

impl SessionGuard {
    /// The guarded session id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.table.close(&self.id);
    }
}
