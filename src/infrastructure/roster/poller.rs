use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::DeviceId;
use crate::infrastructure::roster::client::RosterClient;

/// Fixed-interval roster refresh task.
///
/// Pushes a roster snapshot immediately on start and then on every
/// tick. A failed fetch is logged and skipped; the poller keeps going
/// on its next tick rather than treating one failure as fatal. The
/// task is aborted on drop, so deactivating the device list view
/// cancels the timer with it.
pub struct RosterPoller {
    snapshots: mpsc::UnboundedReceiver<Vec<DeviceId>>,
    task: tokio::task::JoinHandle<()>,
}

impl RosterPoller {
    pub fn start(client: RosterClient, interval: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match client.fetch().await {
                    Ok(devices) => {
                        if tx.send(devices).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("roster poll failed, retrying next tick: {}", e);
                    }
                }
            }
        });

        Self {
            snapshots: rx,
            task,
        }
    }

    /// Latest snapshot, if any arrived since the last call. Drains
    /// intermediate snapshots so the UI always shows the newest set.
    pub fn try_latest(&mut self) -> Option<Vec<DeviceId>> {
        let mut latest = None;
        while let Ok(devices) = self.snapshots.try_recv() {
            latest = Some(devices);
        }
        latest
    }

    /// Await the next snapshot; used by tests and non-interactive
    /// callers.
    pub async fn next(&mut self) -> Option<Vec<DeviceId>> {
        self.snapshots.recv().await
    }
}

impl Drop for RosterPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
