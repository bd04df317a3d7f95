use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::core::codec::{InboundFrame, OutboundPayload};

/// Raw connection events, in transport arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsEvent {
    /// Handshake completed
    Connected,
    /// One inbound frame, tagged text or binary at this boundary
    Frame(InboundFrame),
    /// Clean closure (remote close frame or end of stream)
    Closed,
    /// Handshake failure or transport-level error
    Error(String),
}

/// Commands accepted by the connection task
#[derive(Debug)]
enum WsCommand {
    Send(OutboundPayload),
    Close,
}

/// One WebSocket connection driven by a background task.
///
/// The task owns the socket for its whole life; callers interact only
/// through the command and event channels, so nothing here blocks the
/// UI loop. Events preserve frame arrival order and are never
/// coalesced.
pub struct WsClient {
    commands: mpsc::UnboundedSender<WsCommand>,
    events: mpsc::UnboundedReceiver<WsEvent>,
    task: tokio::task::JoinHandle<()>,
}

impl WsClient {
    /// Start connecting to `url`. Returns immediately; the handshake
    /// outcome arrives as a `Connected` or `Error` event.
    pub fn connect(url: String, connect_timeout: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run_connection(url, connect_timeout, command_rx, event_tx));

        Self {
            commands: command_tx,
            events: event_rx,
            task,
        }
    }

    /// Queue a payload for transmission. Fails only if the connection
    /// task has already exited.
    pub fn send(&self, payload: OutboundPayload) -> Result<(), String> {
        self.commands
            .send(WsCommand::Send(payload))
            .map_err(|_| "connection task has exited".to_string())
    }

    /// Ask the task to send a close frame and shut down. Safe to call
    /// at any point in the connection lifecycle.
    pub fn close(&self) {
        let _ = self.commands.send(WsCommand::Close);
    }

    /// Non-blocking event drain for the TUI tick.
    pub fn try_next_event(&mut self) -> Option<WsEvent> {
        self.events.try_recv().ok()
    }

    /// Await the next event; `None` once the task is gone and the
    /// event queue is drained.
    pub async fn next_event(&mut self) -> Option<WsEvent> {
        self.events.recv().await
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        // Backstop for abnormal teardown paths; the task normally
        // exits on the Close command or remote closure.
        self.task.abort();
    }
}

async fn run_connection(
    url: String,
    connect_timeout: Duration,
    mut commands: mpsc::UnboundedReceiver<WsCommand>,
    events: mpsc::UnboundedSender<WsEvent>,
) {
    let ws_stream = match tokio::time::timeout(connect_timeout, connect_async(&url)).await {
        Ok(Ok((stream, _response))) => stream,
        Ok(Err(e)) => {
            let _ = events.send(WsEvent::Error(format!("connect failed: {}", e)));
            return;
        }
        Err(_) => {
            let _ = events.send(WsEvent::Error(format!(
                "connect timeout after {}ms",
                connect_timeout.as_millis()
            )));
            return;
        }
    };

    info!("WebSocket connection established to {}", url);
    let _ = events.send(WsEvent::Connected);

    pump(ws_stream, &mut commands, &events).await;
}

/// Full-duplex pump between the command channel and the socket.
async fn pump(
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    commands: &mut mpsc::UnboundedReceiver<WsCommand>,
    events: &mpsc::UnboundedSender<WsEvent>,
) {
    let (mut sender, mut receiver) = ws_stream.split();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(WsCommand::Send(payload)) => {
                    let message = match payload {
                        OutboundPayload::Text(text) => Message::Text(text),
                        OutboundPayload::Bytes(bytes) => Message::Binary(bytes),
                    };
                    if let Err(e) = sender.send(message).await {
                        warn!("WebSocket send failed: {}", e);
                        let _ = events.send(WsEvent::Error(format!("send failed: {}", e)));
                        break;
                    }
                }
                Some(WsCommand::Close) | None => {
                    // Local teardown; a failed close frame just means
                    // the peer is already gone.
                    if let Err(e) = sender.send(Message::Close(None)).await {
                        debug!("close frame not delivered: {}", e);
                    }
                    let _ = events.send(WsEvent::Closed);
                    break;
                }
            },
            message = receiver.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(WsEvent::Frame(InboundFrame::Text(text)));
                }
                Some(Ok(Message::Binary(bytes))) => {
                    let _ = events.send(WsEvent::Frame(InboundFrame::Binary(bytes)));
                }
                Some(Ok(Message::Close(_))) | None => {
                    info!("WebSocket closed by remote end");
                    let _ = events.send(WsEvent::Closed);
                    break;
                }
                Some(Ok(_)) => {
                    // Ping/Pong/Frame: handled by tungstenite or irrelevant
                }
                Some(Err(e)) => {
                    warn!("WebSocket receive failed: {}", e);
                    let _ = events.send(WsEvent::Error(e.to_string()));
                    break;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_failure_emits_error_event() {
        // Nothing listens here; the handshake must fail, not hang.
        let mut client = WsClient::connect(
            "ws://127.0.0.1:9/".to_string(),
            Duration::from_millis(1000),
        );
        match client.next_event().await {
            Some(WsEvent::Error(_)) => {}
            other => panic!("expected error event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_echo_roundtrip_and_remote_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // One-shot echo server: accept, echo a single frame, close.
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            if let Some(Ok(msg)) = ws.next().await {
                ws.send(msg).await.unwrap();
            }
            ws.close(None).await.unwrap();
        });

        let mut client = WsClient::connect(
            format!("ws://{}/ws/client?device_id=test", addr),
            Duration::from_millis(1000),
        );

        assert_eq!(client.next_event().await, Some(WsEvent::Connected));

        client
            .send(OutboundPayload::Bytes(vec![0xAA, 0xBB]))
            .unwrap();

        assert_eq!(
            client.next_event().await,
            Some(WsEvent::Frame(InboundFrame::Binary(vec![0xAA, 0xBB])))
        );
        assert_eq!(client.next_event().await, Some(WsEvent::Closed));
    }

    #[tokio::test]
    async fn test_local_close_emits_single_closed_event() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            // Hold the connection open until the client closes it.
            while let Some(Ok(_)) = ws.next().await {}
        });

        let mut client = WsClient::connect(
            format!("ws://{}/", addr),
            Duration::from_millis(1000),
        );
        assert_eq!(client.next_event().await, Some(WsEvent::Connected));

        client.close();
        assert_eq!(client.next_event().await, Some(WsEvent::Closed));
        assert_eq!(client.next_event().await, None);
    }
}
