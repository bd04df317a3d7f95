use std::io;

use tabled::{Table, Tabled};

use crate::core::transcript::TranscriptEntry;
use crate::domain::DeviceId;

use super::args::OutputFormat;

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_devices(&self, devices: &[DeviceId]) -> Result<(), OutputError>;
    fn write_transcript(&self, entries: &[TranscriptEntry]) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::DevTermError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

#[derive(Tabled)]
struct DeviceRow<'a> {
    #[tabled(rename = "Device ID")]
    device_id: &'a str,
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_devices(&self, devices: &[DeviceId]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                if devices.is_empty() {
                    println!("No devices connected.");
                } else {
                    for device in devices {
                        println!("{}", device);
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(devices)?);
            }
            OutputFormat::Table => {
                let rows: Vec<DeviceRow> = devices
                    .iter()
                    .map(|d| DeviceRow { device_id: d })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        Ok(())
    }

    fn write_transcript(&self, entries: &[TranscriptEntry]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text | OutputFormat::Table => {
                for entry in entries {
                    println!("{}", entry.format_line());
                }
            }
            OutputFormat::Json => {
                let lines: Vec<String> = entries.iter().map(|e| e.format_line()).collect();
                println!("{}", serde_json::to_string_pretty(&lines)?);
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "message": message }));
            }
            _ => println!("{}", message),
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({ "error": error }));
            }
            _ => eprintln!("Error: {}", error),
        }
        Ok(())
    }
}
