// Infrastructure module - external interface implementations

pub mod config;
pub mod logging;
pub mod roster;
pub mod ws;
