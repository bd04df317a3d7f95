use std::time::Duration;

use devterm::infrastructure::roster::{RosterClient, RosterPoller};
use devterm::tui::state::AppState;
use devterm::tui::ui::ActiveView;
use devterm::{
    CodecError, DevTermConfig, DevTermError, Direction, InputMode, SessionController,
    SessionEvent, SessionState, Transcript,
};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

/// Mock relay: accepts one session, optionally pushes frames, records
/// what the client sends, then closes from the server side.
async fn spawn_relay(
    push: Vec<Message>,
    close_after_push: bool,
) -> (std::net::SocketAddr, tokio::task::JoinHandle<Vec<Message>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        for frame in push {
            ws.send(frame).await.unwrap();
        }
        if close_after_push {
            ws.close(None).await.unwrap();
            return Vec::new();
        }

        let mut received = Vec::new();
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
            received.push(msg);
        }
        let _ = ws.close(None).await;
        received
    });

    (addr, handle)
}

fn controller_for(addr: std::net::SocketAddr, device: &str) -> SessionController {
    SessionController::connect(
        device.to_string(),
        format!("ws://{}/ws/client?device_id={}", addr, device),
        Duration::from_millis(1000),
        1000,
    )
}

#[tokio::test]
async fn scenario_hex_send_transmits_bytes_and_echoes_tagged_literal() {
    let (addr, relay) = spawn_relay(Vec::new(), false).await;
    let mut controller = controller_for(addr, "esp32-01");

    assert_eq!(controller.pump_next().await, Some(SessionEvent::Opened));

    controller.toggle_mode();
    controller.input_buffer_mut().push_str("AA BB");
    controller.send_input().unwrap();
    controller.disconnect();

    let wire = relay.await.unwrap();
    assert_eq!(wire, vec![Message::Binary(vec![0xAA, 0xBB])]);

    let tx: Vec<_> = controller
        .transcript()
        .entries()
        .filter(|e| e.direction == Direction::Tx)
        .collect();
    assert_eq!(tx.len(), 1);
    assert_eq!(tx[0].text, "[HEX] AA BB");
    assert!(tx[0].format_line().contains("TX > [HEX] AA BB"));
}

#[tokio::test]
async fn scenario_odd_hex_is_rejected_without_side_effects() {
    let (addr, relay) = spawn_relay(Vec::new(), false).await;
    let mut controller = controller_for(addr, "esp32-01");
    assert_eq!(controller.pump_next().await, Some(SessionEvent::Opened));
    let entries_before = controller.transcript().len();

    controller.toggle_mode();
    controller.input_buffer_mut().push_str("AB C");
    let err = controller.send_input().unwrap_err();
    assert!(matches!(err, DevTermError::Codec(CodecError::OddLength)));

    assert_eq!(controller.transcript().len(), entries_before);

    controller.disconnect();
    let wire = relay.await.unwrap();
    assert!(wire.is_empty());
}

#[tokio::test]
async fn scenario_inbound_text_becomes_rx_entry() {
    let (addr, _relay) = spawn_relay(vec![Message::Text("ready\n".to_string())], false).await;
    let mut controller = controller_for(addr, "esp32-01");

    assert_eq!(controller.pump_next().await, Some(SessionEvent::Opened));
    match controller.pump_next().await {
        Some(SessionEvent::Data(_)) => {}
        other => panic!("expected data, got {:?}", other),
    }

    let rx: Vec<_> = controller
        .transcript()
        .entries()
        .filter(|e| e.direction == Direction::Rx)
        .collect();
    assert_eq!(rx.len(), 1);
    assert!(rx[0].text.contains("ready"));
    // Line endings are the renderer's convention, never raw \r\n
    assert!(!rx[0].text.contains('\r'));
}

#[tokio::test]
async fn scenario_unexpected_remote_close_yields_one_system_entry() {
    let (addr, _relay) = spawn_relay(Vec::new(), true).await;
    let mut controller = controller_for(addr, "esp32-01");

    assert_eq!(controller.pump_next().await, Some(SessionEvent::Opened));
    assert_eq!(controller.pump_next().await, Some(SessionEvent::Closed));
    assert_eq!(controller.state(), SessionState::Closed);

    let closed_entries = controller
        .transcript()
        .entries()
        .filter(|e| e.direction == Direction::System && e.text == "Connection closed")
        .count();
    assert_eq!(closed_entries, 1);

    // A local disconnect afterwards must not add a second notification
    controller.disconnect();
    let closed_entries = controller
        .transcript()
        .entries()
        .filter(|e| e.text == "Connection closed")
        .count();
    assert_eq!(closed_entries, 1);

    controller.input_buffer_mut().push_str("late");
    let err = controller.send_input();
    assert!(matches!(err, Err(DevTermError::NotConnected)));
}

#[tokio::test]
async fn scenario_binary_inbound_is_displayed_lossily() {
    let (addr, _relay) =
        spawn_relay(vec![Message::Binary(vec![0x6f, 0x6b, 0xff])], false).await;
    let mut controller = controller_for(addr, "esp32-01");

    controller.pump_next().await;
    controller.pump_next().await;

    let rx = controller
        .transcript()
        .entries()
        .find(|e| e.direction == Direction::Rx)
        .expect("binary frame should still render");
    assert!(rx.text.contains("ok"));
    assert!(rx.text.contains('\u{FFFD}'));
}

/// Mock roster endpoint that always answers with the given body.
async fn spawn_roster(body: &'static str) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
            });
        }
    });

    addr
}

#[tokio::test]
async fn scenario_empty_roster_keeps_waiting_state() {
    // The relay answers `null` until the first device ever connects.
    let addr = spawn_roster("null").await;
    let client = RosterClient::new(
        format!("http://{}/api/devices", addr),
        Duration::from_millis(1000),
    )
    .unwrap();
    let mut poller = RosterPoller::start(client, Duration::from_millis(20));

    let mut state = AppState::new(DevTermConfig::default());
    let waiting_before = state.status_message.clone();

    let snapshot = poller.next().await.expect("poller should deliver a snapshot");
    if !snapshot.is_empty() {
        state.clear_status_message();
    }
    state.set_devices(snapshot);

    // An empty roster is the ordinary waiting case: still on the device
    // list, no selection, no error replacing the waiting notice.
    assert_eq!(state.active_view, ActiveView::Devices);
    assert_eq!(state.selected_device(), None);
    assert_eq!(state.status_message, waiting_before);
    assert!(state
        .status_message
        .as_deref()
        .unwrap_or_default()
        .contains("Waiting"));
}

#[test]
fn test_config_serialization() {
    let config = DevTermConfig::default();
    let toml_str = toml::to_string(&config).expect("Failed to serialize config");
    let deserialized: DevTermConfig =
        toml::from_str(&toml_str).expect("Failed to deserialize config");

    assert_eq!(
        config.global.poll_interval_ms,
        deserialized.global.poll_interval_ms
    );
    assert_eq!(config.server.url, deserialized.server.url);
}

#[test]
fn test_error_display() {
    let error = DevTermError::Config {
        message: "Invalid configuration".to_string(),
    };
    assert!(error.to_string().contains("Configuration error"));
    assert!(error.to_string().contains("Invalid configuration"));

    let error: DevTermError = CodecError::InvalidFormat('Z').into();
    assert!(error.to_string().contains('Z'));
}

#[test]
fn test_input_mode_display() {
    assert_eq!(InputMode::Ascii.to_string(), "ASCII");
    assert_eq!(InputMode::Hex.to_string(), "HEX");
}

#[test]
fn test_session_state_display() {
    assert_eq!(SessionState::Idle.to_string(), "Idle");
    assert_eq!(SessionState::Connecting.to_string(), "Connecting");
    assert_eq!(SessionState::Open.to_string(), "Open");
    assert_eq!(SessionState::Closed.to_string(), "Closed");
    assert_eq!(SessionState::Errored.to_string(), "Errored");
    assert!(SessionState::Closed.is_terminal());
    assert!(!SessionState::Open.is_terminal());
}

#[test]
fn test_transcript_ordering_and_clear() {
    let mut transcript = Transcript::new(100);
    transcript.append(Direction::Tx, "one");
    transcript.append(Direction::Rx, "two");
    transcript.append(Direction::System, "three");
    assert_eq!(transcript.len(), 3);

    let texts: Vec<_> = transcript.entries().map(|e| e.text.clone()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);

    transcript.clear();
    assert_eq!(transcript.len(), 0);
}
