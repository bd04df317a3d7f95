use std::borrow::Cow;

use hex::FromHexError;
use thiserror::Error;

/// Interpretation applied to operator-entered text before transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Send the text verbatim as a text frame
    #[default]
    Ascii,
    /// Parse the text as hex digit pairs and send a binary frame
    Hex,
}

impl InputMode {
    pub fn toggle(self) -> Self {
        match self {
            InputMode::Ascii => InputMode::Hex,
            InputMode::Hex => InputMode::Ascii,
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputMode::Ascii => write!(f, "ASCII"),
            InputMode::Hex => write!(f, "HEX"),
        }
    }
}

/// Payload produced from operator input, ready for the session channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundPayload {
    Text(String),
    Bytes(Vec<u8>),
}

/// One unit of inbound data, tagged at the channel boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Binary(Vec<u8>),
}

/// Operator-input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Empty input; the send action is suppressed rather than reported
    #[error("empty input")]
    EmptyInput,
    #[error("invalid hex character '{0}'")]
    InvalidFormat(char),
    #[error("hex input must have an even number of digits")]
    OddLength,
}

/// Encode operator text for transmission according to the input mode.
///
/// Only outbound, operator-authored input may be rejected here; inbound
/// data always goes through [`decode_for_display`] unconditionally.
pub fn encode(mode: InputMode, text: &str) -> Result<OutboundPayload, CodecError> {
    if text.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    match mode {
        InputMode::Ascii => Ok(OutboundPayload::Text(text.to_string())),
        InputMode::Hex => {
            let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            // Whitespace-only entry strips to nothing, which the hex
            // grammar rejects as malformed rather than empty.
            if clean.is_empty() {
                let c = text.chars().next().unwrap_or(' ');
                return Err(CodecError::InvalidFormat(c));
            }
            // Character validity is reported before length, so mixed
            // failures surface the more actionable error.
            if let Some(c) = clean.chars().find(|c| !c.is_ascii_hexdigit()) {
                return Err(CodecError::InvalidFormat(c));
            }
            let bytes = hex::decode(&clean).map_err(|e| match e {
                FromHexError::InvalidHexCharacter { c, .. } => CodecError::InvalidFormat(c),
                FromHexError::OddLength | FromHexError::InvalidStringLength => {
                    CodecError::OddLength
                }
            })?;
            Ok(OutboundPayload::Bytes(bytes))
        }
    }
}

/// Best-effort text rendition of an inbound frame.
///
/// Text frames pass through unchanged; binary frames are decoded
/// lossily, with undecodable bytes rendered as the replacement
/// character. Never fails.
pub fn decode_for_display(frame: &InboundFrame) -> Cow<'_, str> {
    match frame {
        InboundFrame::Text(text) => Cow::Borrowed(text),
        InboundFrame::Binary(bytes) => String::from_utf8_lossy(bytes),
    }
}
