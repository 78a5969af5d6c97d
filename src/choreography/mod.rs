//! Mascot walk choreography.
//!
//! A walk to a door is two straight legs: horizontal to the door's column,
//! then vertical to the door. Each leg moves the logical position in one
//! jump and the sprite tweens behind it. When both legs are done the screen
//! fades and, after a fixed delay, the router opens the destination page.
//!
//! The sequence is a phase machine driven by frame time:
//!
//! ```text
//! Idle -> LegOne -> LegTwo -> Transitioning -> Navigated
//! ```
//!
//! Only `Idle` accepts a new walk. `cancel` returns to `Idle` from anywhere.

pub mod scheduler;

pub use scheduler::Scheduler;

use std::time::Duration;

use crate::config::Timing;
use crate::error::ChoreographyError;
use crate::positioning::Position;
use crate::state::{entry_target, Direction, EntryDirection, PositionState, ViewportMode, WaypointTable};

/// Receives the destination once the walk and fade are done
pub trait Router {
    fn navigate(&mut self, target: &str);
}

/// Where the walk sequence is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkPhase {
    #[default]
    Idle,
    LegOne,
    LegTwo,
    Transitioning,
    Navigated,
}

/// One straight leg of a walk
#[derive(Debug, Clone, PartialEq)]
pub struct WalkSegment {
    pub start: Position,
    pub end: Position,
    pub direction: Direction,
    pub duration: Duration,
}

/// Both legs of a walk plus the router target
#[derive(Debug, Clone, PartialEq)]
pub struct WalkPlan {
    pub legs: [WalkSegment; 2],
    pub target: String,
}

/// `max(min_leg, distance * ms_per_percent)`
pub fn leg_duration(distance_percent: f32, timing: &Timing) -> Duration {
    let ms = (distance_percent.abs() * timing.ms_per_percent).round();
    let walked = if ms.is_finite() && ms > 0.0 {
        Duration::from_millis(ms as u64)
    } else {
        Duration::ZERO
    };
    walked.max(timing.min_leg())
}

/// Facing for the horizontal leg, from the sign of the displacement.
///
/// A door straight above or below has no horizontal displacement; the
/// mascot then turns left, matching how the About door was always walked.
pub fn first_leg_direction(dx: f32) -> Direction {
    if dx > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Lay out the L-shaped walk from `from` to `door`
pub fn plan_walk(from: Position, door: Position, path: &str, entry: EntryDirection, timing: &Timing) -> WalkPlan {
    let corner = Position::new(door.x, from.y);

    let horizontal = WalkSegment {
        start: from,
        end: corner,
        direction: first_leg_direction(door.x - from.x),
        duration: leg_duration(from.distance_to(&corner), timing),
    };
    let vertical = WalkSegment {
        start: corner,
        end: door,
        direction: Direction::Back,
        duration: leg_duration(corner.distance_to(&door), timing),
    };

    WalkPlan {
        legs: [horizontal, vertical],
        target: entry_target(path, entry),
    }
}

/// Drives the mascot from its spot to a door and hands off to the router
#[derive(Debug, Clone)]
pub struct Choreographer {
    table: WaypointTable,
    timing: Timing,
    phase: WalkPhase,
    scheduler: Scheduler<WalkPhase>,
    plan: Option<WalkPlan>,
}

impl Choreographer {
    pub fn new(table: WaypointTable, timing: Timing) -> Self {
        Self {
            table,
            timing,
            phase: WalkPhase::Idle,
            scheduler: Scheduler::new(),
            plan: None,
        }
    }

    pub fn phase(&self) -> WalkPhase {
        self.phase
    }

    /// True from the start of a walk until it is cancelled or reset
    pub fn is_walking(&self) -> bool {
        self.phase != WalkPhase::Idle
    }

    /// Whether the fade overlay should be up
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, WalkPhase::Transitioning | WalkPhase::Navigated)
    }

    /// Duration of the leg being walked, for the sprite tween
    pub fn current_leg_duration(&self) -> Duration {
        let leg = match self.phase {
            WalkPhase::LegOne => 0,
            WalkPhase::LegTwo => 1,
            _ => return self.timing.min_leg(),
        };
        self.plan
            .as_ref()
            .map(|plan| plan.legs[leg].duration)
            .unwrap_or_else(|| self.timing.min_leg())
    }

    /// Start walking to the door for `entry`.
    ///
    /// Returns `Ok(false)` without touching anything if a walk is already
    /// under way.
    pub fn navigate_to(
        &mut self,
        path: &str,
        entry: EntryDirection,
        mode: ViewportMode,
        state: &mut PositionState,
    ) -> Result<bool, ChoreographyError> {
        if self.phase != WalkPhase::Idle {
            tracing::debug!(path, %entry, phase = ?self.phase, "walk already in progress, ignoring");
            return Ok(false);
        }

        let door = self.table.door(mode, entry)?;
        let plan = plan_walk(state.position(), door, path, entry, &self.timing);
        let first = &plan.legs[0];

        tracing::info!(
            target_route = %plan.target,
            from = %first.start,
            door = %door,
            leg_one_ms = first.duration.as_millis() as u64,
            leg_two_ms = plan.legs[1].duration.as_millis() as u64,
            "walk started"
        );

        state.place(first.end, first.direction);
        self.scheduler.schedule(first.duration, WalkPhase::LegTwo);
        self.phase = WalkPhase::LegOne;
        self.plan = Some(plan);
        Ok(true)
    }

    /// Let `dt` of frame time pass, firing any phases that come due in order
    pub fn tick(&mut self, dt: Duration, state: &mut PositionState, router: &mut dyn Router) {
        let mut budget = dt;
        while let Some(fired) = self.scheduler.advance(budget) {
            budget = fired.overshoot;
            self.enter(fired.payload, state, router);
        }
    }

    fn enter(&mut self, phase: WalkPhase, state: &mut PositionState, router: &mut dyn Router) {
        let Some(plan) = self.plan.as_ref() else {
            self.phase = WalkPhase::Idle;
            return;
        };

        match phase {
            WalkPhase::LegTwo => {
                let leg = &plan.legs[1];
                state.place(leg.end, leg.direction);
                self.scheduler.schedule(leg.duration, WalkPhase::Transitioning);
            }
            WalkPhase::Transitioning => {
                tracing::debug!(target_route = %plan.target, "reached door, fading out");
                self.scheduler.schedule(self.timing.fade_delay(), WalkPhase::Navigated);
            }
            WalkPhase::Navigated => {
                tracing::info!(target_route = %plan.target, "walk finished, navigating");
                router.navigate(&plan.target);
            }
            WalkPhase::Idle | WalkPhase::LegOne => {}
        }
        self.phase = phase;
    }

    /// Drop any pending step and go back to `Idle`.
    ///
    /// Called on teardown and when the layout changes under a walk.
    pub fn cancel(&mut self) {
        if self.scheduler.cancel().is_some() || self.phase != WalkPhase::Idle {
            tracing::debug!(phase = ?self.phase, "walk cancelled");
        }
        self.phase = WalkPhase::Idle;
        self.plan = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VillageConfig;

    #[derive(Default)]
    struct RecordingRouter {
        visits: Vec<String>,
    }

    impl Router for RecordingRouter {
        fn navigate(&mut self, target: &str) {
            self.visits.push(target.to_string());
        }
    }

    fn choreographer() -> Choreographer {
        let config = VillageConfig::default();
        Choreographer::new(config.waypoint_table(), config.timing.clone())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_leg_duration_floor_and_scale() {
        let timing = Timing::default();
        assert_eq!(leg_duration(0.0, &timing), ms(200));
        assert_eq!(leg_duration(40.0, &timing), ms(1600));
        assert_eq!(leg_duration(-40.0, &timing), ms(1600));
        assert_eq!(leg_duration(2.0, &timing), ms(200));
    }

    #[test]
    fn test_first_leg_direction_follows_displacement() {
        assert_eq!(first_leg_direction(-7.0), Direction::Left);
        assert_eq!(first_leg_direction(26.0), Direction::Right);
        assert_eq!(first_leg_direction(0.0), Direction::Left);
    }

    #[test]
    fn test_walk_to_about_end_to_end() {
        let mut walk = choreographer();
        let mut router = RecordingRouter::default();
        let mut state = PositionState::new(Position::new(50.0, 47.0));

        let started = walk
            .navigate_to("/about", EntryDirection::Up, ViewportMode::Desktop, &mut state)
            .unwrap();
        assert!(started);
        assert_eq!(walk.phase(), WalkPhase::LegOne);
        assert_eq!(state.position(), Position::new(43.0, 47.0));
        assert_eq!(state.direction(), Direction::Left);
        assert_eq!(walk.current_leg_duration(), ms(280));

        walk.tick(ms(279), &mut state, &mut router);
        assert_eq!(state.position(), Position::new(43.0, 47.0));

        walk.tick(ms(1), &mut state, &mut router);
        assert_eq!(walk.phase(), WalkPhase::LegTwo);
        assert_eq!(state.position(), Position::new(43.0, 41.0));
        assert_eq!(state.direction(), Direction::Back);
        assert!(!walk.is_transitioning());

        walk.tick(ms(240), &mut state, &mut router);
        assert!(walk.is_transitioning());
        assert!(router.visits.is_empty());

        walk.tick(ms(399), &mut state, &mut router);
        assert!(router.visits.is_empty());

        walk.tick(ms(1), &mut state, &mut router);
        assert_eq!(walk.phase(), WalkPhase::Navigated);
        assert_eq!(router.visits, vec!["/about?entry=up".to_string()]);
    }

    #[test]
    fn test_every_door_in_every_layout() {
        let config = VillageConfig::default();
        for mode in ViewportMode::ALL {
            for entry in EntryDirection::ALL {
                let mut walk = choreographer();
                let mut router = RecordingRouter::default();
                let mut state = PositionState::new(config.layout(mode).default);
                let path = crate::state::Page::behind(entry).path();

                walk.navigate_to(path, entry, mode, &mut state).unwrap();
                walk.tick(Duration::from_secs(30), &mut state, &mut router);

                let door = config.layout(mode).waypoints.get(entry).unwrap();
                assert_eq!(state.position(), door, "{mode} {entry}");
                assert_eq!(state.direction(), Direction::Back);
                assert_eq!(router.visits, vec![format!("{path}?entry={entry}")]);
            }
        }
    }

    #[test]
    fn test_second_call_while_walking_is_ignored() {
        let mut walk = choreographer();
        let mut router = RecordingRouter::default();
        let mut state = PositionState::new(Position::new(50.0, 47.0));

        walk.navigate_to("/about", EntryDirection::Up, ViewportMode::Desktop, &mut state)
            .unwrap();
        walk.tick(ms(100), &mut state, &mut router);
        let before = state.clone();

        let started = walk
            .navigate_to("/contact", EntryDirection::Right, ViewportMode::Desktop, &mut state)
            .unwrap();
        assert!(!started);
        assert_eq!(state, before);

        walk.tick(Duration::from_secs(10), &mut state, &mut router);
        assert_eq!(state.position(), Position::new(43.0, 41.0));
        assert_eq!(router.visits, vec!["/about?entry=up".to_string()]);

        // Navigated still refuses new walks until the view is reset
        let again = walk
            .navigate_to("/contact", EntryDirection::Right, ViewportMode::Desktop, &mut state)
            .unwrap();
        assert!(!again);
    }

    #[test]
    fn test_router_target_shape() {
        let mut walk = choreographer();
        let mut router = RecordingRouter::default();
        let mut state = PositionState::new(Position::new(50.0, 47.0));

        walk.navigate_to("/projects", EntryDirection::Left, ViewportMode::Desktop, &mut state)
            .unwrap();
        for _ in 0..200 {
            walk.tick(ms(33), &mut state, &mut router);
        }

        assert_eq!(router.visits.len(), 1);
        let target = &router.visits[0];
        let (path, query) = target.split_once('?').unwrap();
        assert_eq!(path, "/projects");
        let tag = query.strip_prefix("entry=").unwrap();
        assert!(["left", "up", "right"].contains(&tag));
    }

    #[test]
    fn test_cancel_mid_walk_stops_everything() {
        let mut walk = choreographer();
        let mut router = RecordingRouter::default();
        let mut state = PositionState::new(Position::new(50.0, 47.0));

        walk.navigate_to("/contact", EntryDirection::Right, ViewportMode::Desktop, &mut state)
            .unwrap();
        walk.tick(ms(50), &mut state, &mut router);
        walk.cancel();
        let after_cancel = state.clone();

        walk.tick(Duration::from_secs(10), &mut state, &mut router);
        assert_eq!(walk.phase(), WalkPhase::Idle);
        assert_eq!(state, after_cancel);
        assert!(router.visits.is_empty());
        assert!(!walk.is_walking());
    }

    #[test]
    fn test_missing_door_fails_loudly() {
        let mut walk = Choreographer::new(WaypointTable::new(), Timing::default());
        let mut state = PositionState::new(Position::new(50.0, 47.0));

        let err = walk
            .navigate_to("/about", EntryDirection::Up, ViewportMode::Mobile, &mut state)
            .unwrap_err();
        assert_eq!(
            err,
            ChoreographyError::MissingWaypoint {
                mode: ViewportMode::Mobile,
                entry: EntryDirection::Up
            }
        );
        assert_eq!(walk.phase(), WalkPhase::Idle);
        assert_eq!(state.position(), Position::new(50.0, 47.0));
    }

    #[test]
    fn test_large_frame_fires_phases_in_order() {
        let mut walk = choreographer();
        let mut router = RecordingRouter::default();
        let mut state = PositionState::new(Position::new(50.0, 47.0));

        walk.navigate_to("/about", EntryDirection::Up, ViewportMode::Desktop, &mut state)
            .unwrap();
        // 280 + 240 = 520ms: leg two done, fade raised, router not yet called
        walk.tick(ms(600), &mut state, &mut router);
        assert_eq!(walk.phase(), WalkPhase::Transitioning);
        assert_eq!(state.position(), Position::new(43.0, 41.0));
        assert!(router.visits.is_empty());
    }
}
