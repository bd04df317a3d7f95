// Domain module - Core domain types

pub mod config;
pub mod error;

/// Opaque identifier for a device known to the relay server.
///
/// Uniqueness within the roster is owned by the server; the client
/// treats it as a stable, display-safe string.
pub type DeviceId = String;
