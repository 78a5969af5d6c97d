use std::time::Duration;

/// How long the walk fade takes to reach full black
const FADE_IN_DURATION: Duration = Duration::from_millis(500);

/// How long a revealed page takes to come out of black
const REVEAL_DURATION: Duration = Duration::from_millis(500);

/// Full-screen fade to black that follows the walk's transitioning flag
#[derive(Debug, Clone, Default)]
pub struct ScreenFade {
    active: bool,
    opacity: f32,
}

impl ScreenFade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn tick(&mut self, dt: Duration) {
        let step = dt.as_secs_f32() / FADE_IN_DURATION.as_secs_f32();
        self.opacity = if self.active {
            (self.opacity + step).min(1.0)
        } else {
            (self.opacity - step).max(0.0)
        };
    }

    /// 0.0 is clear, 1.0 is black
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Black hold and fade-out shown whenever the page changes.
///
/// Content stays hidden during the hold, then fades in.
#[derive(Debug, Clone)]
pub struct PageReveal {
    hold: Duration,
    elapsed: Duration,
}

impl PageReveal {
    /// Starts black, as on first load
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            elapsed: Duration::ZERO,
        }
    }

    /// Go back to black for a new page
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.hold + REVEAL_DURATION);
    }

    pub fn content_visible(&self) -> bool {
        self.elapsed >= self.hold
    }

    pub fn opacity(&self) -> f32 {
        if self.elapsed < self.hold {
            return 1.0;
        }
        let fading = (self.elapsed - self.hold).as_secs_f32() / REVEAL_DURATION.as_secs_f32();
        (1.0 - fading).clamp(0.0, 1.0)
    }
}
