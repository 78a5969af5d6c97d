use std::time::Duration;

/// Characters revealed per second
const DEFAULT_RATE: f32 = 40.0;

/// Reveals a message one character at a time
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Total characters in `text`
    len: usize,
    shown: f32,
    rate: f32,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_rate(text, DEFAULT_RATE)
    }

    pub fn with_rate(text: impl Into<String>, rate: f32) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            len,
            shown: 0.0,
            rate,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.shown = (self.shown + dt.as_secs_f32() * self.rate).min(self.len as f32);
    }

    /// The part typed so far
    pub fn visible(&self) -> &str {
        let count = self.shown as usize;
        match self.text.char_indices().nth(count) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }

    pub fn skip(&mut self) {
        self.shown = self.len as f32;
    }
}
