use std::time::Duration;

use super::Position;

/// Fast start, slow end
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Linear movement from one position to another over a fixed time.
///
/// The mascot's logical position jumps when the choreography mutates it;
/// the sprite catches up through a tween lasting as long as the leg.
#[derive(Debug, Clone)]
pub struct Tween {
    from: Position,
    to: Position,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    /// A tween that is already at rest on `at`
    pub fn settled(at: Position) -> Self {
        Self {
            from: at,
            to: at,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    pub fn new(from: Position, to: Position, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Retarget from wherever the tween currently is
    pub fn retarget(&mut self, to: Position, duration: Duration) {
        *self = Self::new(self.current(), to, duration);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        }
    }

    pub fn current(&self) -> Position {
        self.from.lerp(&self.to, self.progress())
    }

    pub fn target(&self) -> Position {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Vertical bob used by idle sprites and floating decorations, in percent
pub fn bob(time: f32, amplitude: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    (time / period * std::f32::consts::TAU).sin() * amplitude
}
