//! Stdio transport — one JSON-RPC envelope per line over stdin/stdout.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::{Dispatcher, ProtocolHandler};
use crate::types::McpResult;

/// Single-session transport over a pair of byte streams.
///
/// Messages are handled strictly one at a time in arrival order.
pub struct StdioTransport {
    handler: ProtocolHandler,
}

impl StdioTransport {
    /// Create a transport with a fresh session over `dispatcher`.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            handler: ProtocolHandler::new(dispatcher),
        }
    }

    /// The session's protocol handler.
    pub fn handler(&self) -> &ProtocolHandler {
        &self.handler
    }

    /// Serve process stdin/stdout until EOF or Ctrl+C.
    pub async fn run(&self) -> McpResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        tracing::info!("MCP server listening on stdio");

        tokio::select! {
            result = self.serve(stdin, stdout) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                self.handler.close();
                Ok(())
            }
        }
    }

    /// Serve an arbitrary reader/writer pair until the reader hits EOF.
    ///
    /// Undecodable lines are answered with an error and the loop goes on.
    /// I/O failures end the loop with an error.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).await?;
            if n == 0 {
                tracing::info!("stdin closed, shutting down");
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            tracing::debug!("Received: {line}");

            if let Some(response) = self.handler.handle_text(line).await {
                let mut frame = serde_json::to_string(&response)?;
                tracing::debug!("Sending: {frame}");
                frame.push('\n');
                writer.write_all(frame.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        self.handler.close();
        Ok(())
    }
}
