use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Direction tag of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Operator-sent data
    Tx,
    /// Device-received data
    Rx,
    /// Connection lifecycle and error notifications
    System,
}

impl Direction {
    /// Stable tag rendered between the timestamp and the payload
    pub fn tag(&self) -> &'static str {
        match self {
            Direction::Tx => "TX >",
            Direction::Rx => "RX <",
            Direction::System => "System:",
        }
    }
}

/// One rendered line of the session transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub timestamp: DateTime<Local>,
    pub direction: Direction,
    pub text: String,
}

impl TranscriptEntry {
    /// Formatted line: `[HH:MM:SS.mmm] TX > payload`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {} {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.direction.tag(),
            self.text
        )
    }
}

/// Append-only, bounded transcript of one terminal session.
///
/// Backed by a ring buffer so a long-running session cannot grow
/// without limit; once `capacity` entries are retained the oldest is
/// evicted on each append. Scroll position and the auto-scroll flag
/// live here so the renderer widget stays stateless.
#[derive(Debug)]
pub struct Transcript {
    entries: VecDeque<TranscriptEntry>,
    capacity: usize,
    auto_scroll: bool,
    /// Offset in entries from the tail; 0 means pinned to the newest entry
    scroll_offset: usize,
}

pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 10_000;

impl Transcript {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            auto_scroll: true,
            scroll_offset: 0,
        }
    }

    /// Append an entry stamped with the local wall clock.
    ///
    /// Line endings inside `text` are normalized to `\n`; rendering
    /// splits on that convention. With auto-scroll enabled the view is
    /// advanced to the newest entry.
    pub fn append(&mut self, direction: Direction, text: impl Into<String>) {
        let text = text.into().replace("\r\n", "\n").replace('\r', "\n");

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(TranscriptEntry {
            timestamp: Local::now(),
            direction,
            text,
        });

        if self.auto_scroll {
            self.scroll_offset = 0;
        } else {
            // Keep the viewport anchored on the same entries.
            self.scroll_offset = (self.scroll_offset + 1).min(self.entries.len());
        }
    }

    /// Remove all entries. Auto-scroll setting is unaffected.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_offset = 0;
    }

    /// Pure state toggle; takes effect on the next append.
    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.entries.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Offset from the newest entry; 0 when pinned to the tail
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_ordered_by_append() {
        let mut transcript = Transcript::default();
        transcript.append(Direction::Tx, "first");
        transcript.append(Direction::Rx, "second");
        transcript.append(Direction::System, "third");

        let texts: Vec<_> = transcript.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(transcript
            .entries()
            .zip(transcript.entries().skip(1))
            .all(|(a, b)| a.timestamp <= b.timestamp));
    }

    #[test]
    fn test_clear_empties_regardless_of_content() {
        let mut transcript = Transcript::default();
        for i in 0..50 {
            transcript.append(Direction::Rx, format!("entry {}", i));
        }
        transcript.set_auto_scroll(false);
        transcript.clear();
        assert_eq!(transcript.len(), 0);
        // Auto-scroll setting survives a clear
        assert!(!transcript.auto_scroll());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut transcript = Transcript::new(3);
        for i in 0..5 {
            transcript.append(Direction::Rx, format!("{}", i));
        }
        let texts: Vec<_> = transcript.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_newline_normalization() {
        let mut transcript = Transcript::default();
        transcript.append(Direction::Rx, "ready\r\nok\rdone");
        let entry = transcript.entries().next().unwrap();
        assert_eq!(entry.text, "ready\nok\ndone");
    }

    #[test]
    fn test_auto_scroll_pins_to_tail() {
        let mut transcript = Transcript::default();
        transcript.append(Direction::Rx, "a");
        transcript.append(Direction::Rx, "b");
        transcript.scroll_up(1);
        assert_ne!(transcript.scroll_offset(), 0);

        // Auto-scroll on: next append snaps back to the newest entry
        transcript.append(Direction::Rx, "c");
        assert_eq!(transcript.scroll_offset(), 0);

        // Auto-scroll off: the viewport stays where the operator left it
        transcript.set_auto_scroll(false);
        transcript.scroll_up(1);
        let before = transcript.scroll_offset();
        transcript.append(Direction::Rx, "d");
        assert_eq!(transcript.scroll_offset(), before + 1);
    }

    #[test]
    fn test_format_line_tags() {
        let mut transcript = Transcript::default();
        transcript.append(Direction::Tx, "ping");
        let line = transcript.entries().next().unwrap().format_line();
        assert!(line.contains("TX > ping"));
        // Timestamp is zero-padded HH:MM:SS.mmm
        let ts = line.trim_start_matches('[');
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
        assert_eq!(ts.as_bytes()[8], b'.');
    }
}
