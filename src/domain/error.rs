use thiserror::Error;

use crate::core::codec::CodecError;

/// DevTerm unified error type
#[derive(Error, Debug)]
pub enum DevTermError {
    #[error("Input encoding error: {0}")]
    Codec(#[from] CodecError),

    #[error("Not connected")]
    NotConnected,

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Roster error: {message}")]
    Roster { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

pub type DevTermResult<T> = Result<T, DevTermError>;
