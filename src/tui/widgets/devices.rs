use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::state::AppState;

pub fn render_devices_panel(f: &mut Frame, area: Rect, state: &AppState) {
    if state.devices.is_empty() {
        let waiting = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No devices connected. Waiting...",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from("The roster refreshes automatically."),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Devices"));

        f.render_widget(waiting, area);
        return;
    }

    let items: Vec<ListItem> = state
        .devices
        .iter()
        .enumerate()
        .map(|(index, device_id)| {
            let content = vec![Line::from(vec![
                Span::styled("●", Style::default().fg(Color::Green)),
                Span::raw(" "),
                Span::raw(device_id.as_str()),
            ])];

            let mut item = ListItem::new(content);
            if index == state.device_cursor {
                item = item.style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                );
            }
            item
        })
        .collect();

    let title = format!("Devices ({}) - Enter to connect", state.devices.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}
