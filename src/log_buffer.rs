//! Fixed-capacity event log for the demo status area.
//!
//! Keeps the most recent events in a ring of short heapless strings so the
//! demo window can show what the monitor just did (topic changes, unit
//! toggles) without allocating in the frame loop.

use heapless::{Deque, String};

/// Number of retained log lines.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum length of one log line; longer messages are truncated.
pub const LOG_LINE_LENGTH: usize = 48;

/// Ring buffer of recent event lines, oldest first.
#[derive(Default)]
pub struct EventLog {
    lines: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, message: &str) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let mut line = String::new();
        // Truncate on a char boundary so multi-byte input cannot fail the copy
        for ch in message.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        // Cannot fail: we just freed a slot if the deque was full
        self.lines.push_back(line).ok();
    }

    /// The most recent line, if any.
    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(|s| s.as_str())
    }

    /// Lines oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_returns_newest() {
        let mut log = EventLog::new();

        log.push("first");
        log.push("second");

        assert_eq!(log.latest(), Some("second"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut log = EventLog::new();

        for i in 0..LOG_BUFFER_SIZE + 2 {
            log.push(&format!("event {i}"));
        }

        assert_eq!(log.len(), LOG_BUFFER_SIZE, "Ring should cap at its capacity");
        assert_eq!(log.iter().next(), Some("event 2"), "Oldest entries should be evicted first");
    }

    #[test]
    fn test_truncates_long_lines() {
        let mut log = EventLog::new();
        let long = "x".repeat(LOG_LINE_LENGTH * 2);

        log.push(&long);

        assert_eq!(log.latest().map(str::len), Some(LOG_LINE_LENGTH));
    }
}
