//! SSE transport — Server-Sent Events over HTTP for web-based MCP clients.
//!
//! A client opens `GET /sse`, receives an `endpoint` event naming its
//! message URL, then POSTs envelopes there. Responses come back as
//! `message` events on the stream, in completion order.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::protocol::Dispatcher;
use crate::session::{SessionGuard, SessionTable};
use crate::types::{parse_message, McpError, McpResult, RequestId};

/// Path of the event stream endpoint.
pub const SSE_PATH: &str = "/sse";

/// Path clients POST envelopes to.
pub const MESSAGE_PATH: &str = "/message";

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// SSE transport for web-based MCP clients.
#[derive(Clone)]
pub struct SseTransport {
    dispatcher: Arc<Dispatcher>,
    sessions: SessionTable,
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: String,
}

impl SseTransport {
    /// Create a new SSE transport over a shared dispatcher.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            sessions: SessionTable::new(),
        }
    }

    /// The open sessions.
    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    /// The HTTP routes, ready to serve or to drive in-process.
    pub fn router(&self) -> Router {
        Router::new()
            .route(SSE_PATH, get(Self::open_stream))
            .route(MESSAGE_PATH, post(Self::post_message))
            .route("/health", get(|| async { "ok" }))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.clone())
    }

    /// Run the SSE server on the given address.
    pub async fn run(&self, addr: &str) -> McpResult<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(McpError::Io)?;

        tracing::info!("SSE transport listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        Ok(())
    }

    async fn open_stream(
        State(transport): State<SseTransport>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        let (id, events, guard) = transport
            .sessions
            .open(Arc::clone(&transport.dispatcher));

        let endpoint = Event::default()
            .event("endpoint")
            .data(format!("{MESSAGE_PATH}?sessionId={id}"));

        let messages = ReceiverStream::new(events).map(|envelope: Value| {
            Ok::<_, Infallible>(Event::default().event("message").data(envelope.to_string()))
        });

        let stream = tokio_stream::once(Ok(endpoint)).chain(messages);

        Sse::new(SessionStream {
            inner: Box::pin(stream),
            _guard: guard,
        })
        .keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
    }

    async fn post_message(
        State(transport): State<SseTransport>,
        Query(query): Query<MessageQuery>,
        body: String,
    ) -> StatusCode {
        let Some(link) = transport.sessions.get(&query.session_id) else {
            tracing::debug!("POST for unknown session {}", query.session_id);
            return StatusCode::NOT_FOUND;
        };

        let message = match parse_message(&body) {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(
                    "Undecodable message for session {}: {}",
                    link.id,
                    error.error.message
                );
                // An error that can be correlated to a request goes back
                // on the stream; anything else only gets the status code.
                if matches!(error.id, RequestId::Null) {
                    return StatusCode::BAD_REQUEST;
                }
                let envelope = match serde_json::to_value(&error) {
                    Ok(envelope) => envelope,
                    Err(_) => return StatusCode::BAD_REQUEST,
                };
                tokio::spawn(async move {
                    link.deliver(envelope).await;
                });
                return StatusCode::ACCEPTED;
            }
        };

        tokio::spawn(async move {
            if let Some(response) = link.handler.handle_message(message).await {
                link.deliver(response).await;
            }
        });

        StatusCode::ACCEPTED
    }
}

/// Event stream that owns its session: dropping it closes the session.
struct SessionStream<S> {
    inner: Pin<Box<S>>,
    _guard: SessionGuard,
}

impl<S> Stream for SessionStream<S>
where
    S: Stream<Item = Result<Event, Infallible>>,
{
    type Item = Result<Event, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
