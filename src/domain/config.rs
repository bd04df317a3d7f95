use serde::{Deserialize, Serialize};

/// DevTerm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevTermConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Relay server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Device roster poll interval in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// WebSocket connect timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// Maximum retained transcript entries per session
    #[serde(default = "default_transcript_capacity")]
    pub transcript_capacity: usize,
}

/// Relay server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base HTTP(S) URL of the relay server
    #[serde(default = "default_server_url")]
    pub url: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval() -> u64 {
    2000
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_transcript_capacity() -> usize {
    10_000
}

fn default_server_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

impl Default for DevTermConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            poll_interval_ms: default_poll_interval(),
            connect_timeout_ms: default_connect_timeout(),
            transcript_capacity: default_transcript_capacity(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

impl ServerConfig {
    /// URL of the device roster endpoint
    pub fn devices_url(&self) -> String {
        format!("{}/api/devices", self.url.trim_end_matches('/'))
    }

    /// WebSocket URL of the session endpoint for a device.
    ///
    /// Derived from the HTTP base URL by scheme substitution, mirroring
    /// how a browser client derives `ws://` from its page location.
    pub fn session_url(&self, device_id: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            // Already a ws/wss URL, or schemeless; pass through unchanged.
            base.to_string()
        };
        format!("{}/ws/client?device_id={}", ws_base, device_id)
    }
}
