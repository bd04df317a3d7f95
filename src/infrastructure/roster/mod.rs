// Roster module - device discovery endpoint polling

pub mod client;
pub mod poller;

pub use client::RosterClient;
pub use poller::RosterPoller;
