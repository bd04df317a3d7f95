//! DevTerm Library
//!
//! Remote device terminal client providing a WebSocket session bridge
//! with ASCII/HEX input encoding, a timestamped transcript, and device
//! roster polling.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod tui;

pub use crate::core::codec::{CodecError, InboundFrame, InputMode, OutboundPayload};
pub use crate::core::session::{SessionChannel, SessionController, SessionEvent, SessionState};
pub use crate::core::transcript::{Direction, Transcript, TranscriptEntry};
pub use crate::domain::config::DevTermConfig;
pub use crate::domain::error::{DevTermError, DevTermResult};
pub use crate::domain::DeviceId;
