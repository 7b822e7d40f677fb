//! Typing-text intro.

/// Reveals a string one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Milliseconds before the first character.
    start_delay_ms: f64,
    /// Milliseconds between characters.
    char_interval_ms: f64,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, start_delay_ms: u64, char_interval_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_delay_ms: start_delay_ms as f64,
            char_interval_ms: char_interval_ms as f64,
        }
    }

    /// Number of characters shown at `now_ms`.
    pub fn visible_chars(&self, now_ms: f64) -> usize {
        let total = self.text.chars().count();
        if now_ms < self.start_delay_ms {
            return 0;
        }
        if self.char_interval_ms <= 0.0 {
            return total;
        }
        let typed = ((now_ms - self.start_delay_ms) / self.char_interval_ms).floor() as usize + 1;
        typed.min(total)
    }

    /// Prefix shown at `now_ms`.
    pub fn visible(&self, now_ms: f64) -> &str {
        let count = self.visible_chars(now_ms);
        match self.text.char_indices().nth(count) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.visible_chars(now_ms) == self.text.chars().count()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_one_char_per_interval_after_delay() {
        let t = Typewriter::new("Ada", 500, 100);
        assert_eq!(t.visible(0.0), "");
        assert_eq!(t.visible(499.9), "");
        assert_eq!(t.visible(500.0), "A");
        assert_eq!(t.visible(599.0), "A");
        assert_eq!(t.visible(600.0), "Ad");
        assert!(!t.is_finished(600.0));
        assert_eq!(t.visible(700.0), "Ada");
        assert!(t.is_finished(700.0));
    }

    #[test]
    fn test_late_frame_catches_up() {
        let t = Typewriter::new("Lovelace", 500, 100);
        assert_eq!(t.visible(10_000.0), "Lovelace");
    }

    #[test]
    fn test_multibyte_text() {
        let t = Typewriter::new("Zoë K", 0, 10);
        assert_eq!(t.visible(25.0), "Zoë");
    }

    #[test]
    fn test_zero_interval_shows_everything() {
        let t = Typewriter::new("now", 0, 0);
        assert_eq!(t.visible(0.0), "now");
        assert_eq!(Typewriter::new("", 0, 100).visible(1e6), "");
    }
}
