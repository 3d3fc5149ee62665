//! The live channel: owns the push connection and fans frames out.
//!
//! One connection per process. Inbound UTF-8 text frames are normalized to
//! [`ChannelMessage`] and rebroadcast to every subscriber; a 15-second
//! keep-alive probe runs while the connection is open. There is no reconnect
//! policy at this layer — the owner decides when to call `connect` again
//! after a drop.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::envelope::{decode_frame, ChannelMessage};
use crate::transport::TransportError;

const CHANNEL_CAPACITY: usize = 1024;
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);
/// Liveness probe frame. Plain text, never a JSON event.
const KEEPALIVE_FRAME: &str = "ping";

/// One open connection delivering text frames.
#[async_trait]
pub trait PushSocket: Send {
    async fn send_text(&mut self, text: &str) -> Result<(), TransportError>;
    /// Next inbound text frame; `None` once the connection is closed.
    async fn recv_text(&mut self) -> Option<String>;
}

/// Opens push sockets. Separate from the channel so tests can inject a fake.
#[async_trait]
pub trait PushConnector: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PushSocket>, TransportError>;
}

/// Process-wide push fan-out. Constructed once and passed by reference to
/// every store; each test builds its own instance.
pub struct LiveChannel {
    tx: broadcast::Sender<ChannelMessage>,
    connector: Box<dyn PushConnector>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl LiveChannel {
    pub fn new(connector: Box<dyn PushConnector>) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            connector,
            reader: Mutex::new(None),
        }
    }

    /// Channel backed by a websocket connection to `url`.
    pub fn websocket(url: impl Into<String>) -> Self {
        Self::new(Box::new(WsConnector { url: url.into() }))
    }

    /// Establish the push connection and start the keep-alive. A no-op while
    /// a connection task is still running.
    pub async fn connect(&self) -> Result<(), TransportError> {
        if self.is_connected() {
            return Ok(());
        }
        let mut socket = self.connector.open().await?;
        // Initial liveness probe; send failures are logged, never fatal.
        if let Err(error) = socket.send_text(KEEPALIVE_FRAME).await {
            tracing::warn!("keep-alive send failed on connect: {error}");
        }
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(KEEPALIVE_INTERVAL);
            // An interval's first tick completes immediately; the probe for
            // that tick already went out above.
            interval.tick().await;
            loop {
                tokio::select! {
                    frame = socket.recv_text() => {
                        match frame {
                            Some(text) => {
                                // Decoding never fails (malformed frames become
                                // Raw), so one bad frame cannot stall delivery
                                // of the frames behind it.
                                if tx.send(decode_frame(&text)).is_err() {
                                    tracing::trace!("push frame dropped (no subscribers)");
                                }
                            }
                            None => {
                                tracing::info!("push connection closed");
                                break;
                            }
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(error) = socket.send_text(KEEPALIVE_FRAME).await {
                            tracing::warn!("keep-alive send failed: {error}");
                        }
                    }
                }
            }
        });
        let mut reader = self.reader.lock().expect("channel mutex poisoned");
        match reader.as_ref() {
            // Lost a connect race; keep the task that won.
            Some(previous) if !previous.is_finished() => handle.abort(),
            _ => *reader = Some(handle),
        }
        Ok(())
    }

    /// Whether a connection task is currently running.
    pub fn is_connected(&self) -> bool {
        self.reader
            .lock()
            .expect("channel mutex poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Register a subscriber. Dropping the receiver unsubscribes. Every live
    /// receiver sees every message exactly once, in receipt order; receivers
    /// subscribed mid-dispatch only see messages sent after they joined.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelMessage> {
        self.tx.subscribe()
    }

    /// Close the connection and halt the keep-alive. Safe to call repeatedly
    /// and with no connection open.
    pub fn disconnect(&self) {
        if let Some(handle) = self
            .reader
            .lock()
            .expect("channel mutex poisoned")
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for LiveChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// ---------------------------------------------------------------------------
// Websocket implementation
// ---------------------------------------------------------------------------

/// Production connector over tokio-tungstenite.
pub struct WsConnector {
    pub url: String,
}

#[async_trait]
impl PushConnector for WsConnector {
    async fn open(&self) -> Result<Box<dyn PushSocket>, TransportError> {
        let (stream, _) = tokio_tungstenite::connect_async(self.url.as_str())
            .await
            .map_err(|error| TransportError::Request(error.to_string()))?;
        Ok(Box::new(WsSocket { stream }))
    }
}

struct WsSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl PushSocket for WsSocket {
    async fn send_text(&mut self, text: &str) -> Result<(), TransportError> {
        self.stream
            .send(Message::Text(text.to_string()))
            .await
            .map_err(|error| TransportError::Request(error.to_string()))
    }

    async fn recv_text(&mut self) -> Option<String> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) | Err(_) => return None,
                // Binary/ping/pong frames are transport noise.
                Ok(_) => continue,
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
