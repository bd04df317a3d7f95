// CLI module - Command Line Interface

pub mod args;
pub mod commands;
pub mod output;
