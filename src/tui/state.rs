use crate::core::session::SessionController;
use crate::domain::config::DevTermConfig;
use crate::domain::DeviceId;

use super::ui::ActiveView;

/// UI-facing application state for one run of the TUI.
///
/// At most one session controller exists at a time; switching devices
/// always drops the previous controller (closing its channel) before a
/// new one is created.
pub struct AppState {
    pub active_view: ActiveView,
    pub devices: Vec<DeviceId>,
    pub device_cursor: usize,
    pub controller: Option<SessionController>,
    pub input_active: bool,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub terminal_size: (u16, u16),
    config: DevTermConfig,
}

impl AppState {
    pub fn new(config: DevTermConfig) -> Self {
        Self {
            active_view: ActiveView::Devices,
            devices: Vec::new(),
            device_cursor: 0,
            controller: None,
            input_active: false,
            status_message: Some("Waiting for devices... Press 'h' for help.".to_string()),
            show_help: false,
            terminal_size: (80, 24),
            config,
        }
    }

    pub fn config(&self) -> &DevTermConfig {
        &self.config
    }

    /// Replace the roster snapshot, keeping the cursor on a valid row.
    pub fn set_devices(&mut self, devices: Vec<DeviceId>) {
        self.devices = devices;
        if self.device_cursor >= self.devices.len() {
            self.device_cursor = self.devices.len().saturating_sub(1);
        }
    }

    pub fn selected_device(&self) -> Option<&DeviceId> {
        self.devices.get(self.device_cursor)
    }

    pub fn select_next_device(&mut self) {
        if !self.devices.is_empty() {
            self.device_cursor = (self.device_cursor + 1) % self.devices.len();
        }
    }

    pub fn select_previous_device(&mut self) {
        if !self.devices.is_empty() {
            self.device_cursor = if self.device_cursor == 0 {
                self.devices.len() - 1
            } else {
                self.device_cursor - 1
            };
        }
    }

    /// Open a session to `device_id` and switch to the terminal view.
    /// Any previous controller is dropped first, which closes its
    /// channel before the new one starts connecting.
    pub fn open_session(&mut self, device_id: DeviceId) {
        self.controller = None;

        let session_url = self.config.server.session_url(&device_id);
        let connect_timeout =
            std::time::Duration::from_millis(self.config.global.connect_timeout_ms);
        let capacity = self.config.global.transcript_capacity;

        self.controller = Some(SessionController::connect(
            device_id,
            session_url,
            connect_timeout,
            capacity,
        ));
        self.active_view = ActiveView::Terminal;
        self.input_active = false;
        self.status_message = None;
    }

    /// Leave the terminal view, closing the channel with it.
    pub fn close_session(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.disconnect();
        }
        self.controller = None;
        self.active_view = ActiveView::Devices;
        self.input_active = false;
    }

    /// Per-tick update: drain session events into the transcript.
    pub fn tick(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.pump();
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
