//! TCP streaming sink with a single accepted client.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::sink::OutputSink;

/// Streams one comma-separated line per event to a connected client.
///
/// Binding starts exactly one background accept task; the task stores the
/// first (and only) client in a shared slot and ends, dropping the
/// listener with it. The connection lifecycle is strictly
/// `Listening -> Connected -> Closed`; there is no way back to listening.
/// Events delivered while no client is connected are dropped, not queued.
pub struct TcpSink {
    local_addr: SocketAddr,
    connection: Arc<Mutex<Option<TcpStream>>>,
    accept_task: JoinHandle<()>,
}

impl TcpSink {
    /// Binds the listener and spawns the accept task. Port 0 asks the OS
    /// for a free port; see [`TcpSink::local_addr`].
    pub async fn bind(port: u16) -> io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port)).await?;
        let local_addr = listener.local_addr()?;
        info!("TCP sink listening on {local_addr}");

        let connection = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&connection);
        let accept_task = tokio::spawn(async move {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    info!("Client connected: {peer}");
                    *slot.lock().await = Some(stream);
                }
                Err(e) => error!(error = %e, "Error accepting client connection"),
            }
        });

        Ok(Self {
            local_addr,
            connection,
            accept_task,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Closes the client connection, then the accept task and listener.
    /// Safe to call more than once and with no client ever connected.
    pub async fn shutdown(&self) {
        if let Some(mut stream) = self.connection.lock().await.take() {
            let _ = stream.shutdown().await;
        }
        self.accept_task.abort();
        info!("TCP sink stopped");
    }
}

#[async_trait]
impl OutputSink for TcpSink {
    async fn deliver(&self, patient_id: u32, timestamp_ms: i64, label: &str, data: &str) {
        let mut slot = self.connection.lock().await;
        let Some(stream) = slot.as_mut() else {
            // No client yet: silently drop.
            return;
        };

        let line = format!("{patient_id},{timestamp_ms},{label},{data}\n");
        if let Err(e) = stream.write_all(line.as_bytes()).await {
            warn!(error = %e, "Error sending event to client");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, BufReader};

    /// The accept task registers the client asynchronously, so tests probe
    /// with deliveries until one makes it through.
    async fn first_received_line(sink: &TcpSink, lines: &mut tokio::io::Lines<BufReader<TcpStream>>) -> String {
        for _ in 0..500 {
            sink.deliver(99, 999, "Alert", "resolved").await;
            if let Ok(Ok(Some(line))) =
                tokio::time::timeout(Duration::from_millis(10), lines.next_line()).await
            {
                return line;
            }
        }
        panic!("client never received a line");
    }

    #[tokio::test]
    async fn drops_events_until_client_connects() {
        let sink = TcpSink::bind(0).await.unwrap();

        // No client yet: must not error and must not be buffered.
        sink.deliver(1, 111, "Alert", "triggered").await;

        let stream = TcpStream::connect(sink.local_addr()).await.unwrap();
        let mut lines = BufReader::new(stream).lines();

        let first = first_received_line(&sink, &mut lines).await;
        assert_eq!(first, "99,999,Alert,resolved");

        sink.shutdown().await;
    }

    #[tokio::test]
    async fn streams_connected_deliveries_in_order() {
        let sink = TcpSink::bind(0).await.unwrap();
        let stream = TcpStream::connect(sink.local_addr()).await.unwrap();
        let mut lines = BufReader::new(stream).lines();

        // Drain probe traffic, then watch a known pair arrive in order.
        first_received_line(&sink, &mut lines).await;
        sink.deliver(5, 555, "Alert", "triggered").await;
        sink.deliver(5, 556, "Alert", "resolved").await;

        let mut received = Vec::new();
        while received.len() < 2 {
            match tokio::time::timeout(Duration::from_secs(1), lines.next_line()).await {
                Ok(Ok(Some(line))) if !line.starts_with("99,") => received.push(line),
                Ok(Ok(Some(_))) => {}
                _ => panic!("expected two lines from the sink"),
            }
        }
        assert_eq!(received, vec!["5,555,Alert,triggered", "5,556,Alert,resolved"]);

        sink.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let sink = TcpSink::bind(0).await.unwrap();
        sink.shutdown().await;
        sink.shutdown().await;
        // Delivery after shutdown degrades to a drop.
        sink.deliver(1, 1, "Alert", "triggered").await;
    }
}
