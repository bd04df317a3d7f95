use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::DeviceId;

use super::{state::AppState, ui::ActiveView};

/// High-level actions produced from key input
#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    Connect(DeviceId),
    Disconnect,
    SendInput,
    ClearTranscript,
    ToggleInputMode,
    ToggleAutoScroll,
}

pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        // Typing into the message field captures almost everything
        if state.input_active {
            return self.handle_typing(key, state);
        }

        if state.show_help {
            if matches!(key.code, KeyCode::Char('h') | KeyCode::Esc | KeyCode::Char('q')) {
                state.toggle_help();
            }
            return None;
        }

        match key.code {
            KeyCode::Char('h') => {
                state.toggle_help();
                None
            }
            KeyCode::Char('q') => Some(AppEvent::Quit),
            _ => match state.active_view {
                ActiveView::Devices => self.handle_devices_view(key, state),
                ActiveView::Terminal => self.handle_terminal_view(key, state),
            },
        }
    }

    fn handle_typing(&self, key: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        match key.code {
            KeyCode::Enter => Some(AppEvent::SendInput),
            KeyCode::Esc => {
                state.input_active = false;
                None
            }
            KeyCode::Backspace => {
                if let Some(controller) = state.controller.as_mut() {
                    controller.input_buffer_mut().pop();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(controller) = state.controller.as_mut() {
                    controller.input_buffer_mut().push(c);
                }
                None
            }
            _ => None,
        }
    }

    fn handle_devices_view(&self, key: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                state.select_previous_device();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.select_next_device();
                None
            }
            KeyCode::Enter => state.selected_device().cloned().map(AppEvent::Connect),
            _ => None,
        }
    }

    fn handle_terminal_view(&self, key: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('i') => {
                state.input_active = true;
                state.clear_status_message();
                None
            }
            KeyCode::Esc | KeyCode::Char('b') => Some(AppEvent::Disconnect),
            KeyCode::Char('m') => Some(AppEvent::ToggleInputMode),
            KeyCode::Char('a') => Some(AppEvent::ToggleAutoScroll),
            KeyCode::Char('c') => Some(AppEvent::ClearTranscript),
            KeyCode::PageUp => {
                if let Some(controller) = state.controller.as_mut() {
                    controller.scroll_up(10);
                }
                None
            }
            KeyCode::PageDown => {
                if let Some(controller) = state.controller.as_mut() {
                    controller.scroll_down(10);
                }
                None
            }
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
