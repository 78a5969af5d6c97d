use std::f32::consts::PI;

use rand::Rng;

use crate::positioning::Position;

/// Brightness pulse for the hovered hotspot label
#[derive(Debug, Clone)]
pub struct PulseAnimation {
    phase: f32,
    frequency: f32,
    min_value: f32,
    max_value: f32,
}

impl PulseAnimation {
    pub fn new(frequency: f32) -> Self {
        Self {
            phase: 0.0,
            frequency,
            min_value: 0.6,
            max_value: 1.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.phase = (self.phase + dt * self.frequency * 2.0 * PI) % (2.0 * PI);
    }

    pub fn value(&self) -> f32 {
        let normalized = (self.phase.sin() + 1.0) / 2.0;
        self.min_value + normalized * (self.max_value - self.min_value)
    }
}

impl Default for PulseAnimation {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A small floating light drifting around a fixed anchor
#[derive(Debug, Clone)]
pub struct Mote {
    pub anchor: Position,
    /// Peak offset in percent on each axis
    pub drift: (f32, f32),
    /// Seconds per full loop
    pub period: f32,
    /// Seconds of head start, so motes move out of step
    pub delay: f32,
    pub color_index: usize,
}

impl Mote {
    /// Position at `time` seconds; follows a 0 -> peak -> 0 ease like the
    /// map's floating decorations
    pub fn position_at(&self, time: f32) -> Position {
        let t = ((time + self.delay) / self.period).rem_euclid(1.0);
        let swing = (t * PI).sin();
        let swing = swing * swing;
        Position::new(self.anchor.x + self.drift.0 * swing, self.anchor.y + self.drift.1 * swing)
    }

    /// Twinkle brightness, 0.6 to 1.0
    pub fn brightness_at(&self, time: f32) -> f32 {
        let t = (time + self.delay) * 1.3;
        let base = (t * PI).sin();
        let harmonic = (t * PI * 2.0).sin() * 0.2;
        (base + harmonic + 1.2) / 2.4 * 0.4 + 0.6
    }
}

/// The map's decorative motes
#[derive(Debug, Clone, Default)]
pub struct Motes {
    motes: Vec<Mote>,
    time: f32,
}

impl Motes {
    /// Scatter `count` motes across the sky band of the map
    pub fn scatter<R: Rng>(count: usize, rng: &mut R) -> Self {
        let motes = (0..count)
            .map(|i| Mote {
                anchor: Position::new(rng.gen_range(8.0..92.0), rng.gen_range(6.0..30.0)),
                drift: (rng.gen_range(-8.0..8.0), rng.gen_range(-15.0..-5.0) / 2.0),
                period: rng.gen_range(3.5..5.0),
                delay: rng.gen_range(0.0..2.0),
                color_index: i,
            })
            .collect();
        Self { motes, time: 0.0 }
    }

    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Current `(position, brightness, color_index)` of each mote
    pub fn current(&self) -> impl Iterator<Item = (Position, f32, usize)> + '_ {
        self.motes.iter().map(move |m| {
            (
                m.position_at(self.time).clamp(),
                m.brightness_at(self.time),
                m.color_index,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mote_returns_to_anchor() {
        let mote = Mote {
            anchor: Position::new(20.0, 20.0),
            drift: (5.0, -10.0),
            period: 4.0,
            delay: 0.0,
            color_index: 0,
        };
        assert_eq!(mote.position_at(0.0), Position::new(20.0, 20.0));
        let peak = mote.position_at(2.0);
        assert!((peak.x - 25.0).abs() < 0.01);
        assert!((peak.y - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_scatter_is_seeded() {
        let a = Motes::scatter(3, &mut StdRng::seed_from_u64(7));
        let b = Motes::scatter(3, &mut StdRng::seed_from_u64(7));
        let pa: Vec<_> = a.current().map(|(p, _, _)| p).collect();
        let pb: Vec<_> = b.current().map(|(p, _, _)| p).collect();
        assert_eq!(pa.len(), 3);
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_pulse_range() {
        let mut pulse = PulseAnimation::new(2.0);
        for _ in 0..50 {
            pulse.update(0.033);
            let v = pulse.value();
            assert!((0.6..=1.0).contains(&v));
        }
    }
}
