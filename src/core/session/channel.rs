use std::time::Duration;

use tracing::debug;

use crate::core::codec::{InboundFrame, OutboundPayload};
use crate::core::session::state::{SessionState, StateMachine};
use crate::domain::error::{DevTermError, DevTermResult};
use crate::domain::DeviceId;
use crate::infrastructure::ws::{WsClient, WsEvent};

/// Lifecycle and data events surfaced to the session controller.
///
/// Each event corresponds to exactly one accepted state-machine
/// transition (or, for `Data`, to one frame delivered while Open), so
/// the controller can map every event to exactly one transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Opened,
    Data(InboundFrame),
    Closed,
    Errored(String),
}

/// One duplex connection bound to one device for its whole lifetime.
///
/// Owns the transport client and the lifecycle state machine; raw
/// transport events are filtered through the machine so that refused
/// transitions (a connect completing after a local close, a second
/// close) never produce an observable effect.
pub struct SessionChannel {
    device_id: DeviceId,
    machine: StateMachine,
    client: WsClient,
}

impl SessionChannel {
    /// Create the channel and start connecting to the session endpoint
    /// for `device_id`. The handshake outcome arrives later as an
    /// `Opened` or `Errored` event.
    pub fn open(device_id: DeviceId, session_url: String, connect_timeout: Duration) -> Self {
        let mut machine = StateMachine::new();
        machine.begin_connect();
        debug!("opening session channel for device {}", device_id);

        Self {
            device_id,
            machine,
            client: WsClient::connect(session_url, connect_timeout),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    /// Transmit a payload. Valid only while Open; otherwise fails with
    /// `NotConnected` and performs no transmission.
    pub fn send(&mut self, payload: OutboundPayload) -> DevTermResult<()> {
        if !self.machine.can_send() {
            return Err(DevTermError::NotConnected);
        }
        self.client
            .send(payload)
            .map_err(|message| DevTermError::Transport { message })
    }

    /// Drain one accepted event without blocking; refused transitions
    /// are discarded silently.
    pub fn poll_event(&mut self) -> Option<SessionEvent> {
        while let Some(event) = self.client.try_next_event() {
            if let Some(accepted) = self.apply(event) {
                return Some(accepted);
            }
        }
        None
    }

    /// Await the next accepted event; `None` once the transport task is
    /// gone. Used by the one-shot CLI path and tests.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        while let Some(event) = self.client.next_event().await {
            if let Some(accepted) = self.apply(event) {
                return Some(accepted);
            }
        }
        None
    }

    /// Initiate teardown. Idempotent: returns `true` only on the one
    /// call that actually transitions to Closed, so the caller appends
    /// exactly one "closed" notification.
    pub fn close(&mut self) -> bool {
        if self.machine.close() {
            self.client.close();
            true
        } else {
            false
        }
    }

    fn apply(&mut self, event: WsEvent) -> Option<SessionEvent> {
        match event {
            WsEvent::Connected => self.machine.connect_ok().then_some(SessionEvent::Opened),
            WsEvent::Frame(frame) => {
                // Chunks are only deliverable while Open; anything
                // racing past a close is dropped with the channel.
                self.machine.can_send().then_some(SessionEvent::Data(frame))
            }
            WsEvent::Closed => self.machine.remote_closed().then_some(SessionEvent::Closed),
            WsEvent::Error(message) => {
                let transitioned = if self.machine.state() == SessionState::Connecting {
                    self.machine.connect_err()
                } else {
                    self.machine.transport_error()
                };
                transitioned.then_some(SessionEvent::Errored(message))
            }
        }
    }
}
