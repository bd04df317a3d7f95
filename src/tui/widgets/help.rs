use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::{state::AppState, ui::centered_rect};

pub fn render_help_popup(f: &mut Frame, area: Rect, _state: &AppState) {
    let popup_area = centered_rect(70, 70, area);

    // Clear the background
    f.render_widget(Clear, popup_area);

    let help_content = vec![
        Line::from("DevTerm - Help"),
        Line::from(""),
        Line::from("Device List:"),
        Line::from("  ↑/k ↓/j  - Move selection"),
        Line::from("  Enter    - Open terminal session"),
        Line::from(""),
        Line::from("Terminal:"),
        Line::from("  i        - Type a message"),
        Line::from("  Enter    - Send (while typing)"),
        Line::from("  m        - Toggle ASCII/HEX input mode"),
        Line::from("  a        - Toggle auto-scroll"),
        Line::from("  c        - Clear transcript"),
        Line::from("  PgUp/PgDn- Scroll transcript"),
        Line::from("  Esc / b  - Back to device list (disconnects)"),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  h        - Toggle this help"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from("HEX mode sends whitespace-separated hex pairs,"),
        Line::from("e.g. 'AA BB CC' transmits the bytes AA BB CC."),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(help, popup_area);
}
