//! Bounded scrollback of rendered console lines.

use std::collections::VecDeque;

use bevy::prelude::*;
use chrono::{Local, NaiveTime};

/// Format used for entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// One rendered line of console output.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEntry {
    /// The line text, without timestamp.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// `HH:MM:SS` stamp, if the line carries one.
    pub timestamp: Option<String>,
}

impl MessageEntry {
    /// Create an entry without a timestamp.
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            timestamp: None,
        }
    }

    /// The text as it is shown on screen.
    pub fn rendered(&self) -> String {
        match &self.timestamp {
            Some(stamp) => format!("[{}] {}", stamp, self.text),
            None => self.text.clone(),
        }
    }
}

/// Ordered, capacity-bounded collection of [`MessageEntry`].
///
/// Insertion order is display order: the front is the oldest line, the back
/// the newest. After any mutation `len() <= capacity()`.
///
/// # Examples
///
/// ```
/// use bevy::prelude::Color;
/// use bevy_ingame_console::core::MessageBuffer;
///
/// let mut buffer = MessageBuffer::new(2, false);
/// buffer.display("first\nsecond\nthird", Color::WHITE);
///
/// let lines: Vec<_> = buffer.iter().map(|e| e.text.as_str()).collect();
/// assert_eq!(lines, ["second", "third"]);
/// ```
#[derive(Resource, Debug, Clone)]
pub struct MessageBuffer {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
    show_timestamps: bool,
    scroll_to_latest: bool,
}

impl MessageBuffer {
    /// Create an empty buffer. A zero capacity is raised to one.
    pub fn new(capacity: usize, show_timestamps: bool) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            show_timestamps,
            scroll_to_latest: false,
        }
    }

    /// Display a message stamped with the current local time.
    ///
    /// Returns the number of evicted entries.
    pub fn display(&mut self, message: &str, color: Color) -> usize {
        self.display_at(message, color, Local::now().time())
    }

    /// Display a message stamped with `time`.
    ///
    /// The message is split on newlines and empty lines are dropped. Only the
    /// last line of a multi-line message gets the timestamp.
    pub fn display_at(&mut self, message: &str, color: Color, time: NaiveTime) -> usize {
        let lines: Vec<&str> = message
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .collect();

        let Some(last) = lines.len().checked_sub(1) else {
            return 0;
        };

        for (index, line) in lines.into_iter().enumerate() {
            let timestamp = (self.show_timestamps && index == last)
                .then(|| time.format(TIMESTAMP_FORMAT).to_string());
            self.entries.push_back(MessageEntry {
                text: line.to_string(),
                color,
                timestamp,
            });
        }

        self.scroll_to_latest = true;
        self.evict_overflow()
    }

    fn evict_overflow(&mut self) -> usize {
        let over = self.entries.len().saturating_sub(self.capacity);
        // Dropping the entries releases their text.
        self.entries.drain(..over);
        over
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take the pending "scroll to newest entry" request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_latest)
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MessageEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&MessageEntry> {
        self.entries.back()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 34, 56).unwrap()
    }

    fn texts(buffer: &MessageBuffer) -> Vec<&str> {
        buffer.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut buffer = MessageBuffer::new(3, false);
        for i in 0..10 {
            buffer.display(&format!("line {i}"), Color::WHITE);
            assert!(buffer.len() <= 3);
        }
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut buffer = MessageBuffer::new(4, false);
        buffer.display("a\nb\nc", Color::WHITE);
        assert_eq!(buffer.display("d\ne\nf", Color::WHITE), 2);
        assert_eq!(texts(&buffer), ["c", "d", "e", "f"]);

        // A single message larger than the capacity keeps its tail.
        assert_eq!(buffer.display("1\n2\n3\n4\n5\n6", Color::WHITE), 6);
        assert_eq!(texts(&buffer), ["3", "4", "5", "6"]);
    }

    #[test]
    fn test_clear_empties_buffer() {
        let mut buffer = MessageBuffer::new(10, true);
        buffer.display("one\ntwo", Color::WHITE);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.iter().count(), 0);
        assert!(buffer.latest().is_none());
    }

    #[test]
    fn test_only_last_line_is_timestamped() {
        let mut buffer = MessageBuffer::new(10, true);
        buffer.display_at("a\nb\nc", Color::WHITE, noon());

        let rendered: Vec<String> = buffer.iter().map(MessageEntry::rendered).collect();
        assert_eq!(rendered, ["a", "b", "[12:34:56] c"]);
    }

    #[test]
    fn test_timestamps_disabled() {
        let mut buffer = MessageBuffer::new(10, false);
        buffer.display_at("hello", Color::WHITE, noon());
        assert_eq!(buffer.latest().unwrap().timestamp, None);
        assert_eq!(buffer.latest().unwrap().rendered(), "hello");
    }

    #[test]
    fn test_empty_lines_are_dropped() {
        let mut buffer = MessageBuffer::new(10, false);
        buffer.display("a\n\n\r\nb\r\n", Color::WHITE);
        assert_eq!(texts(&buffer), ["a", "b"]);

        buffer.take_scroll_request();
        assert_eq!(buffer.display("\n\n", Color::WHITE), 0);
        assert_eq!(buffer.len(), 2);
        assert!(!buffer.take_scroll_request());
    }

    #[test]
    fn test_display_requests_scroll() {
        let mut buffer = MessageBuffer::new(10, false);
        assert!(!buffer.take_scroll_request());
        buffer.display("hi", Color::WHITE);
        assert!(buffer.take_scroll_request());
        assert!(!buffer.take_scroll_request());
    }

    #[test]
    fn test_entry_keeps_color() {
        let red = Color::srgb(1.0, 0.0, 0.0);
        let mut buffer = MessageBuffer::new(10, false);
        buffer.display("boom", red);
        assert_eq!(buffer.latest().unwrap().color, red);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let buffer = MessageBuffer::new(0, false);
        assert_eq!(buffer.capacity(), 1);
    }
}
