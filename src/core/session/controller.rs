use std::time::Duration;

use crate::core::codec::{self, CodecError, InputMode};
use crate::core::session::channel::{SessionChannel, SessionEvent};
use crate::core::session::state::SessionState;
use crate::core::transcript::{Direction, Transcript};
use crate::domain::error::{DevTermError, DevTermResult};
use crate::domain::DeviceId;

/// Orchestrates codec, transcript, and channel for one terminal view.
///
/// Created on view activation, dropped on deactivation; the channel it
/// owns is closed on [`disconnect`](Self::disconnect) or on drop, so a
/// navigated-away view never leaves an orphaned connection behind.
pub struct SessionController {
    channel: SessionChannel,
    transcript: Transcript,
    input_mode: InputMode,
    input_buffer: String,
}

impl SessionController {
    /// Activate a session for `device_id`: fresh channel, fresh
    /// transcript, ASCII input mode.
    pub fn connect(
        device_id: DeviceId,
        session_url: String,
        connect_timeout: Duration,
        transcript_capacity: usize,
    ) -> Self {
        Self {
            channel: SessionChannel::open(device_id, session_url, connect_timeout),
            transcript: Transcript::new(transcript_capacity),
            input_mode: InputMode::default(),
            input_buffer: String::new(),
        }
    }

    pub fn device_id(&self) -> &str {
        self.channel.device_id()
    }

    pub fn state(&self) -> SessionState {
        self.channel.state()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn input_buffer_mut(&mut self) -> &mut String {
        &mut self.input_buffer
    }

    /// Drain pending channel events into transcript entries. Called
    /// once per UI tick; each accepted event yields exactly one entry.
    pub fn pump(&mut self) {
        while let Some(event) = self.channel.poll_event() {
            self.record(event);
        }
    }

    /// Await-and-record variant for non-interactive callers.
    pub async fn pump_next(&mut self) -> Option<SessionEvent> {
        let event = self.channel.next_event().await?;
        self.record(event.clone());
        Some(event)
    }

    fn record(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Opened => {
                self.transcript.append(
                    Direction::System,
                    format!("Connected to {}", self.channel.device_id()),
                );
            }
            SessionEvent::Data(frame) => {
                let text = codec::decode_for_display(&frame).into_owned();
                self.transcript.append(Direction::Rx, text);
            }
            SessionEvent::Closed => {
                self.transcript.append(Direction::System, "Connection closed");
            }
            SessionEvent::Errored(message) => {
                self.transcript
                    .append(Direction::System, format!("Connection error: {}", message));
            }
        }
    }

    /// Send the pending input in the current mode.
    ///
    /// Empty input is a silent no-op. Validation failures are returned
    /// for the status line without touching channel or transcript. On
    /// success the TX transcript entry carries the literal typed text,
    /// `[HEX]`-tagged in hex mode, regardless of the wire
    /// representation.
    pub fn send_input(&mut self) -> DevTermResult<()> {
        let text = self.input_buffer.clone();

        let payload = match codec::encode(self.input_mode, &text) {
            Ok(payload) => payload,
            Err(CodecError::EmptyInput) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        self.channel.send(payload)?;

        let echo = match self.input_mode {
            InputMode::Ascii => text,
            InputMode::Hex => format!("[HEX] {}", text),
        };
        self.transcript.append(Direction::Tx, echo);
        self.input_buffer.clear();
        Ok(())
    }

    /// Clear the transcript; session state is unaffected.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.transcript.set_auto_scroll(enabled);
    }

    pub fn toggle_auto_scroll(&mut self) {
        let enabled = !self.transcript.auto_scroll();
        self.transcript.set_auto_scroll(enabled);
    }

    pub fn toggle_mode(&mut self) {
        self.input_mode = self.input_mode.toggle();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.transcript.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.transcript.scroll_down(lines);
    }

    /// Tear down the channel on view deactivation. Idempotent; the
    /// "closed" notification is appended on the one effective call.
    pub fn disconnect(&mut self) {
        if self.channel.close() {
            self.transcript.append(Direction::System, "Connection closed");
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.channel.close();
    }
}
