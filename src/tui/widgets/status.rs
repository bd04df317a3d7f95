use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::{state::AppState, ui::ActiveView};

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if let Some(message) = &state.status_message {
        message.clone()
    } else {
        match state.active_view {
            ActiveView::Devices => format!(
                "Devices: {} | Enter: connect | h: help | q: quit",
                state.devices.len()
            ),
            ActiveView::Terminal => {
                "i: type | m: mode | a: auto-scroll | c: clear | Esc: back".to_string()
            }
        }
    };

    let status_style = if state.status_message.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let status = Paragraph::new(Line::from(vec![Span::styled(status_text, status_style)]));
    f.render_widget(status, area);
}
