use std::time::Duration;

use crate::domain::error::{DevTermError, DevTermResult};
use crate::domain::DeviceId;

/// Read-only client for the device roster endpoint.
///
/// The endpoint returns the current set of connected device
/// identifiers as a JSON array; an empty array is the ordinary
/// "no devices yet" case, not an error.
#[derive(Clone)]
pub struct RosterClient {
    devices_url: String,
    http: reqwest::Client,
}

impl RosterClient {
    pub fn new(devices_url: String, timeout: Duration) -> DevTermResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DevTermError::Roster {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { devices_url, http })
    }

    /// Fetch the current roster. Membership only; ordering is not
    /// significant, but the result is sorted for stable display.
    pub async fn fetch(&self) -> DevTermResult<Vec<DeviceId>> {
        let response = self
            .http
            .get(&self.devices_url)
            .send()
            .await
            .map_err(|e| DevTermError::Roster {
                message: format!("roster fetch failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DevTermError::Roster {
                message: format!("roster endpoint returned {}", status),
            });
        }

        // The server sends `null` instead of `[]` when no device has
        // ever connected.
        let devices: Option<Vec<DeviceId>> =
            response.json().await.map_err(|e| DevTermError::Roster {
                message: format!("invalid roster payload: {}", e),
            })?;

        let mut devices = devices.unwrap_or_default();
        devices.sort();
        Ok(devices)
    }
}
