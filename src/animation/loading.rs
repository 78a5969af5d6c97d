use std::time::Duration;

/// Number of blocks in the loading bar
pub const TOTAL_BLOCKS: u32 = 16;

/// Startup progress bar that fills over a fixed time
#[derive(Debug, Clone)]
pub struct LoadingProgress {
    elapsed: Duration,
    duration: Duration,
}

impl LoadingProgress {
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Whole percent, 0 to 100
    pub fn percent(&self) -> u32 {
        if self.duration.is_zero() {
            return 100;
        }
        ((self.elapsed.as_secs_f32() / self.duration.as_secs_f32()) * 100.0).floor() as u32
    }

    pub fn filled_blocks(&self) -> u32 {
        (self.percent() as f32 / 100.0 * TOTAL_BLOCKS as f32).round() as u32
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}
