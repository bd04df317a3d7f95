// Session module - device terminal session bridge

pub mod channel;
pub mod controller;
pub mod state;

pub use channel::{SessionChannel, SessionEvent};
pub use controller::SessionController;
pub use state::SessionState;
