use std::time::Duration;

use crate::positioning::{bob, Position, Tween};

/// Which sprite the mascot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Front,
    Left,
    Right,
    Back,
}

/// Body animation layered on top of the sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Idle,
    Walk,
    Speak,
}

/// The mascot's logical position and facing.
///
/// Written by the walk choreography and by the map view's resets; everything
/// else only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionState {
    position: Position,
    direction: Direction,
}

impl PositionState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            direction: Direction::Front,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move and turn in one step
    pub fn place(&mut self, position: Position, direction: Direction) {
        self.position = position;
        self.direction = direction;
    }

    /// Jump to a resting spot facing the viewer
    pub fn reset(&mut self, position: Position) {
        self.place(position, Direction::Front);
    }
}

/// Sprite height in percent of the map
pub const DEFAULT_SIZE: f32 = 8.0;

/// Renderer-side view of the mascot.
///
/// Follows `PositionState` with a tween so a jump in the logical position
/// reads as a walk on screen.
#[derive(Debug, Clone)]
pub struct MascotSprite {
    tween: Tween,
    direction: Direction,
    pose: Pose,
    message: Option<String>,
    /// Seconds since the sprite was created, drives the idle bob
    clock: f32,
    /// Sprite height in percent of the map
    size: f32,
}

impl MascotSprite {
    pub fn new(state: &PositionState) -> Self {
        Self {
            tween: Tween::settled(state.position()),
            direction: state.direction(),
            pose: Pose::Idle,
            message: None,
            clock: 0.0,
            size: DEFAULT_SIZE,
        }
    }

    /// Pick up changes from the logical state.
    ///
    /// A moved position starts a tween lasting `leg`; walking stops once the
    /// tween settles.
    pub fn sync(&mut self, state: &PositionState, leg: Duration) {
        self.direction = state.direction();
        if self.tween.target() != state.position() {
            self.tween.retarget(state.position(), leg);
            self.pose = Pose::Walk;
        }
    }

    /// Jump straight to the logical position, skipping the walk
    pub fn snap(&mut self, state: &PositionState) {
        self.tween = Tween::settled(state.position());
        self.direction = state.direction();
        if self.pose == Pose::Walk {
            self.pose = Pose::Idle;
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.clock += dt.as_secs_f32();
        self.tween.advance(dt);
        if self.pose == Pose::Walk && self.tween.is_finished() {
            self.pose = if self.message.is_some() { Pose::Speak } else { Pose::Idle };
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn set_message(&mut self, message: Option<String>) {
        self.pose = match (&message, self.pose) {
            (_, Pose::Walk) => Pose::Walk,
            (Some(_), _) => Pose::Speak,
            (None, Pose::Speak) => Pose::Idle,
            (None, pose) => pose,
        };
        self.message = message;
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Where to draw the sprite this frame, including the pose offset
    pub fn display_position(&self) -> Position {
        let base = self.tween.current();
        let offset = match self.pose {
            Pose::Idle => bob(self.clock, 0.6, 2.0),
            Pose::Walk | Pose::Speak => 0.0,
        };
        Position::new(base.x, base.y + offset)
    }

    /// Alternates every 300 ms while walking
    pub fn step_frame(&self) -> bool {
        self.pose == Pose::Walk && (self.clock / 0.3) as u32 % 2 == 1
    }
}

impl Default for MascotSprite {
    fn default() -> Self {
        Self::new(&PositionState::new(Position::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_walks_to_new_position() {
        let mut state = PositionState::new(Position::new(50.0, 47.0));
        let mut sprite = MascotSprite::new(&state);

        state.place(Position::new(43.0, 47.0), Direction::Left);
        sprite.sync(&state, Duration::from_millis(280));
        assert_eq!(sprite.pose(), Pose::Walk);
        assert_eq!(sprite.direction(), Direction::Left);

        sprite.tick(Duration::from_millis(140));
        assert_eq!(sprite.pose(), Pose::Walk);
        assert!((sprite.display_position().x - 46.5).abs() < 0.01);

        sprite.tick(Duration::from_millis(300));
        assert_eq!(sprite.pose(), Pose::Idle);
        assert_eq!(sprite.display_position().x, 43.0);
    }

    #[test]
    fn test_snap_skips_walk() {
        let mut state = PositionState::new(Position::new(50.0, 47.0));
        let mut sprite = MascotSprite::new(&state);
        state.reset(Position::new(50.0, 60.0));
        sprite.snap(&state);
        assert_eq!(sprite.direction(), Direction::Front);
        assert_eq!(sprite.display_position().x, 50.0);
        assert_eq!(sprite.pose(), Pose::Idle);
    }

    #[test]
    fn test_message_switches_pose() {
        let mut sprite = MascotSprite::default();
        sprite.set_message(Some("hello".to_string()));
        assert_eq!(sprite.pose(), Pose::Speak);
        sprite.set_message(None);
        assert_eq!(sprite.pose(), Pose::Idle);
    }
}
