// Core module - codec, transcript, and session bridge

pub mod codec;
pub mod session;
pub mod transcript;
