use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::core::codec::InputMode;
use crate::core::transcript::{Direction as EntryDirection, TranscriptEntry};
use crate::tui::state::AppState;

pub fn render_terminal_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Transcript
            Constraint::Length(3), // Input field
        ])
        .split(area);

    render_transcript(f, chunks[0], state);
    render_input(f, chunks[1], state);
}

/// Stable three-way color mapping for entry directions
fn direction_color(direction: EntryDirection) -> Color {
    match direction {
        EntryDirection::Tx => Color::Green,
        EntryDirection::Rx => Color::Cyan,
        EntryDirection::System => Color::Yellow,
    }
}

fn entry_lines(entry: &TranscriptEntry) -> Vec<Line<'_>> {
    let color = direction_color(entry.direction);
    let prefix = format!(
        "[{}] {} ",
        entry.timestamp.format("%H:%M:%S%.3f"),
        entry.direction.tag()
    );
    let indent = " ".repeat(prefix.chars().count());

    entry
        .text
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                Line::from(vec![
                    Span::styled(prefix.clone(), Style::default().fg(Color::Gray)),
                    Span::styled(line, Style::default().fg(color)),
                ])
            } else {
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(line, Style::default().fg(color)),
                ])
            }
        })
        .collect()
}

fn render_transcript(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(controller) = state.controller.as_ref() else {
        return;
    };
    let transcript = controller.transcript();

    // Window the visible tail: skip `scroll_offset` entries from the
    // end, then take what fits.
    let visible_rows = area.height.saturating_sub(2) as usize;
    let shown = transcript
        .len()
        .saturating_sub(transcript.scroll_offset());
    let start = shown.saturating_sub(visible_rows);

    let items: Vec<ListItem> = transcript
        .entries()
        .skip(start)
        .take(shown - start)
        .map(|entry| ListItem::new(entry_lines(entry)))
        .collect();

    let scroll_marker = if transcript.scroll_offset() > 0 {
        format!(" [scrolled -{}]", transcript.scroll_offset())
    } else {
        String::new()
    };
    let title = format!(
        "{} [{}]{}",
        controller.device_id(),
        controller.state(),
        scroll_marker
    );

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn render_input(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(controller) = state.controller.as_ref() else {
        return;
    };

    let placeholder = match controller.input_mode() {
        InputMode::Hex => "e.g. AA BB CC",
        InputMode::Ascii => "Type message...",
    };

    let (text, style) = if state.input_active {
        (
            controller.input_buffer().to_string(),
            Style::default().fg(Color::White),
        )
    } else if controller.input_buffer().is_empty() {
        (
            format!("{} (press 'i' to type)", placeholder),
            Style::default().fg(Color::Gray),
        )
    } else {
        (
            controller.input_buffer().to_string(),
            Style::default().fg(Color::Gray),
        )
    };

    let auto_scroll = if controller.transcript().auto_scroll() {
        "on"
    } else {
        "off"
    };
    let title = format!(
        "Input [{}] | auto-scroll {}",
        controller.input_mode(),
        auto_scroll
    );

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if state.input_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    f.render_widget(input, area);

    if state.input_active {
        f.set_cursor(
            area.x + controller.input_buffer().chars().count() as u16 + 1,
            area.y + 1,
        );
    }
}
