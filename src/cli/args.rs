use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

/// Command line arguments for DevTerm
#[derive(Parser, Debug)]
#[command(
    name = "devterm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remote device terminal client",
    long_about = "Browse connected hardware devices on a relay server and open a live, \
bidirectional terminal session to one of them, with ASCII and HEX input modes."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Relay server base URL (overrides configuration)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Output format for non-interactive commands
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Command to execute; defaults to the interactive TUI
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the devices currently known to the relay server
    Devices,
    /// Open a one-shot session: send a payload and collect replies
    Send(SendArgs),
    /// Interactive TUI mode (default)
    Tui,
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Table output
    Table,
}

/// One-shot send arguments
#[derive(ClapArgs, Debug)]
pub struct SendArgs {
    /// Target device identifier
    #[arg(short, long)]
    pub device: String,

    /// Payload to send
    pub data: String,

    /// Interpret the payload as hex digit pairs instead of ASCII text
    #[arg(long)]
    pub hex: bool,

    /// How long to collect replies after sending, in milliseconds
    #[arg(long, default_value = "1000")]
    pub wait_ms: u64,
}
