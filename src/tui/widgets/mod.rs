// Widgets module - TUI panels

pub mod devices;
pub mod help;
pub mod status;
pub mod terminal;
