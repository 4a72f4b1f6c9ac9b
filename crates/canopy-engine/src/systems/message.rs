//! Expiring status messages.
//!
//! A message carries its own expiry timestamp and is checked whenever it is
//! read, so no timer callback can clear a newer message by accident.

/// A line of text that disappears at a wall-clock deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiringMessage {
    pub text: String,
    /// Expiry in milliseconds; `None` keeps the message until replaced.
    pub expires_at_ms: Option<f64>,
}

impl ExpiringMessage {
    pub fn is_live(&self, now_ms: f64) -> bool {
        self.expires_at_ms.map_or(true, |t| now_ms < t)
    }
}

/// Holds at most one message; showing a new one replaces the old.
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    current: Option<ExpiringMessage>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` for `duration_ms` starting at `now_ms`.
    pub fn show(&mut self, text: impl Into<String>, now_ms: f64, duration_ms: f64) {
        self.current = Some(ExpiringMessage {
            text: text.into(),
            expires_at_ms: Some(now_ms + duration_ms),
        });
    }

    /// Show `text` until something replaces or clears it.
    pub fn show_persistent(&mut self, text: impl Into<String>) {
        self.current = Some(ExpiringMessage {
            text: text.into(),
            expires_at_ms: None,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The live message at `now_ms`, if any.
    pub fn current(&self, now_ms: f64) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|m| m.is_live(now_ms))
            .map(|m| m.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_at_deadline() {
        let mut board = MessageBoard::new();
        board.show("hello", 1000.0, 500.0);
        assert_eq!(board.current(1000.0), Some("hello"));
        assert_eq!(board.current(1499.0), Some("hello"));
        assert_eq!(board.current(1500.0), None);
    }

    #[test]
    fn newer_message_keeps_its_own_deadline() {
        let mut board = MessageBoard::new();
        board.show("first", 0.0, 2000.0);
        board.show("second", 1900.0, 1200.0);
        assert_eq!(board.current(2500.0), Some("second"));
    }

    #[test]
    fn persistent_message_never_expires() {
        let mut board = MessageBoard::new();
        board.show_persistent("halted");
        assert_eq!(board.current(f64::MAX / 2.0), Some("halted"));
        board.clear();
        assert_eq!(board.current(0.0), None);
    }
}
