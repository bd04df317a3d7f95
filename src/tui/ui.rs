use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::{
    state::AppState,
    widgets::{
        devices::render_devices_panel,
        help::render_help_popup,
        status::render_status_bar,
        terminal::render_terminal_panel,
    },
};

/// Which screen the operator is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Devices,
    Terminal,
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveView::Devices => write!(f, "Devices"),
            ActiveView::Terminal => write!(f, "Terminal"),
        }
    }
}

pub fn draw_ui(f: &mut Frame, state: &mut AppState) {
    let size = f.size();
    state.terminal_size = (size.width, size.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    match state.active_view {
        ActiveView::Devices => render_devices_panel(f, chunks[0], state),
        ActiveView::Terminal => render_terminal_panel(f, chunks[0], state),
    }

    render_status_bar(f, chunks[1], state);

    if state.show_help {
        render_help_popup(f, size, state);
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
