use std::time::Duration;

const WALK_IN_AT: Duration = Duration::from_millis(1000);
const GREETING_AT: Duration = Duration::from_millis(2500);
const HOTSPOTS_AT: Duration = Duration::from_millis(4000);

/// Opening beats on the first visit to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntroStage {
    /// Nothing but the map
    Empty,
    /// Mascot walks in
    WalkIn,
    /// Speech bubble up
    Greeting,
    /// Hotspots clickable
    Ready,
}

#[derive(Debug, Clone)]
pub struct Intro {
    elapsed: Duration,
}

impl Intro {
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
        }
    }

    /// An intro that has already played
    pub fn finished() -> Self {
        Self { elapsed: HOTSPOTS_AT }
    }

    /// Advance; returns the new stage if one was entered
    pub fn tick(&mut self, dt: Duration) -> Option<IntroStage> {
        let before = self.stage();
        self.elapsed = (self.elapsed + dt).min(HOTSPOTS_AT);
        let after = self.stage();
        (after != before).then_some(after)
    }

    pub fn stage(&self) -> IntroStage {
        if self.elapsed >= HOTSPOTS_AT {
            IntroStage::Ready
        } else if self.elapsed >= GREETING_AT {
            IntroStage::Greeting
        } else if self.elapsed >= WALK_IN_AT {
            IntroStage::WalkIn
        } else {
            IntroStage::Empty
        }
    }

    /// Progress through the walk-in, 0.0 to 1.0
    pub fn walk_in_progress(&self) -> f32 {
        if self.elapsed < WALK_IN_AT {
            return 0.0;
        }
        ((self.elapsed - WALK_IN_AT).as_secs_f32() / (GREETING_AT - WALK_IN_AT).as_secs_f32()).min(1.0)
    }

    pub fn skip(&mut self) -> Option<IntroStage> {
        self.tick(HOTSPOTS_AT)
    }

    pub fn hotspots_ready(&self) -> bool {
        self.stage() == IntroStage::Ready
    }
}

impl Default for Intro {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_timeline() {
        let mut intro = Intro::new();
        assert_eq!(intro.stage(), IntroStage::Empty);
        assert_eq!(intro.tick(Duration::from_millis(999)), None);
        assert_eq!(intro.tick(Duration::from_millis(1)), Some(IntroStage::WalkIn));
        assert_eq!(intro.tick(Duration::from_millis(1500)), Some(IntroStage::Greeting));
        assert!(!intro.hotspots_ready());
        assert_eq!(intro.tick(Duration::from_millis(1500)), Some(IntroStage::Ready));
        assert!(intro.hotspots_ready());
        assert_eq!(intro.tick(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_skip_jumps_to_ready() {
        let mut intro = Intro::new();
        assert_eq!(intro.skip(), Some(IntroStage::Ready));
        assert_eq!(intro.walk_in_progress(), 1.0);
        assert!(Intro::finished().hotspots_ready());
    }
}
