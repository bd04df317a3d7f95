// WebSocket module - session endpoint transport

pub mod client;

pub use client::{WsClient, WsEvent};
