pub mod intro;
pub mod loading;
pub mod pulse;
pub mod transition;
pub mod typewriter;

pub use intro::{Intro, IntroStage};
pub use loading::LoadingProgress;
pub use pulse::{Motes, PulseAnimation};
pub use transition::{PageReveal, ScreenFade};
pub use typewriter::Typewriter;

use std::time::{Duration, Instant};

/// Target frame rate
pub const TARGET_FPS: u32 = 30;

/// Frame duration for target FPS
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS as u64);

/// Longest step fed to the walk in one frame. A stalled terminal should not
/// make the mascot teleport through its legs.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Frame pacing for the main loop
pub struct AnimationLoop {
    last_frame: Instant,
    frame_count: u64,
    fps_sample_start: Instant,
    fps_sample_count: u32,
    current_fps: u32,
}

impl AnimationLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_count: 0,
            fps_sample_start: now,
            fps_sample_count: 0,
            current_fps: TARGET_FPS,
        }
    }

    /// Check if it's time for a new frame
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= FRAME_DURATION
    }

    /// Time since last frame, capped at `MAX_FRAME_STEP`
    pub fn delta(&self) -> Duration {
        self.last_frame.elapsed().min(MAX_FRAME_STEP)
    }

    /// Mark frame as rendered
    pub fn frame_rendered(&mut self) {
        self.last_frame = Instant::now();
        self.frame_count += 1;
        self.fps_sample_count += 1;

        if self.fps_sample_start.elapsed() >= Duration::from_secs(1) {
            self.current_fps = self.fps_sample_count;
            self.fps_sample_count = 0;
            self.fps_sample_start = Instant::now();
        }
    }

    pub fn fps(&self) -> u32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time until next frame
    pub fn time_until_next_frame(&self) -> Duration {
        FRAME_DURATION.saturating_sub(self.last_frame.elapsed())
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}
