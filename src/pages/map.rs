use std::time::Duration;

use rand::rngs::StdRng;
use ratatui::layout::Rect;
use rand::SeedableRng;

use crate::animation::{Intro, IntroStage, Motes, PulseAnimation, ScreenFade, Typewriter};
use crate::choreography::{Choreographer, Router, WalkPhase};
use crate::config::{ModeLayout, VillageConfig};
use crate::error::ChoreographyError;
use crate::state::{
    hotspot_at, EntryDirection, Hotspot, MascotSprite, Pose, PositionState, Route, ViewportMode,
    ViewportWatcher,
};

const MOTE_COUNT: usize = 5;

/// The village map page.
///
/// Owns the mascot's position, the walk choreography and the viewport mode.
/// Nothing outside this type writes to any of them.
pub struct MapView {
    desktop: ModeLayout,
    mobile: ModeLayout,
    viewport: ViewportWatcher,
    state: PositionState,
    choreographer: Choreographer,
    sprite: MascotSprite,
    intro: Intro,
    greeting: String,
    speech: Option<Typewriter>,
    motes: Motes,
    fade: ScreenFade,
    hovered: Option<EntryDirection>,
    pulse: PulseAnimation,
}

impl MapView {
    /// Mount the map for `route` in a terminal `columns` wide.
    ///
    /// Arriving with an `entry` tag starts the mascot at the crossroad and
    /// skips the intro; a fresh visit starts at the layout default.
    pub fn mount(config: &VillageConfig, route: &Route, columns: u16, play_intro: bool) -> Self {
        let viewport = ViewportWatcher::for_columns(config.breakpoint_px, config.cell_width_px, columns);
        let layout = config.layout(viewport.mode());

        let start = match route.entry {
            Some(_) => layout.crossroad,
            None => layout.default,
        };
        let state = PositionState::new(start);
        let intro = if play_intro && route.entry.is_none() {
            Intro::new()
        } else {
            Intro::finished()
        };

        tracing::info!(
            mode = %viewport.mode(),
            start = %start,
            entry = ?route.entry,
            intro = !intro.hotspots_ready(),
            "map mounted"
        );

        Self {
            desktop: config.desktop.clone(),
            mobile: config.mobile.clone(),
            sprite: MascotSprite::new(&state),
            choreographer: Choreographer::new(config.waypoint_table(), config.timing.clone()),
            viewport,
            state,
            intro,
            greeting: config.greeting.clone(),
            speech: None,
            motes: Motes::scatter(MOTE_COUNT, &mut StdRng::from_entropy()),
            fade: ScreenFade::new(),
            hovered: None,
            pulse: PulseAnimation::new(1.5),
        }
    }

    pub fn mode(&self) -> ViewportMode {
        self.viewport.mode()
    }

    pub fn layout(&self) -> &ModeLayout {
        match self.viewport.mode() {
            ViewportMode::Desktop => &self.desktop,
            ViewportMode::Mobile => &self.mobile,
        }
    }

    pub fn position_state(&self) -> &PositionState {
        &self.state
    }

    pub fn sprite(&self) -> &MascotSprite {
        &self.sprite
    }

    pub fn intro(&self) -> &Intro {
        &self.intro
    }

    pub fn motes(&self) -> &Motes {
        &self.motes
    }

    pub fn fade_opacity(&self) -> f32 {
        self.fade.opacity()
    }

    pub fn walk_phase(&self) -> WalkPhase {
        self.choreographer.phase()
    }

    pub fn is_walking(&self) -> bool {
        self.choreographer.is_walking()
    }

    pub fn is_transitioning(&self) -> bool {
        self.choreographer.is_transitioning()
    }

    /// Text currently typed into the speech bubble
    pub fn speech_text(&self) -> Option<&str> {
        self.speech.as_ref().map(|s| s.visible())
    }

    /// Hotspots the user may click; none until the intro is over
    pub fn hotspots(&self) -> &[Hotspot] {
        if self.intro.hotspots_ready() {
            &self.layout().hotspots
        } else {
            &[]
        }
    }

    pub fn hovered(&self) -> Option<EntryDirection> {
        self.hovered
    }

    pub fn hover_glow(&self) -> f32 {
        self.pulse.value()
    }

    /// Walk to the hotspot behind `entry`
    pub fn activate(&mut self, entry: EntryDirection) -> Result<bool, ChoreographyError> {
        let Some(path) = self
            .hotspots()
            .iter()
            .find(|h| h.entry == entry)
            .map(|h| h.path.clone())
        else {
            return Ok(false);
        };

        let mode = self.viewport.mode();
        let started = self.choreographer.navigate_to(&path, entry, mode, &mut self.state)?;
        if started {
            self.speech = None;
            self.sprite.set_message(None);
        }
        Ok(started)
    }

    /// Handle a click on cell `(col, row)` of the map drawn into `field`
    pub fn click(&mut self, field: Rect, col: u16, row: u16) -> Result<bool, ChoreographyError> {
        let entry = hotspot_at(self.hotspots(), field, col, row).map(|h| h.entry);
        match entry {
            Some(entry) => self.activate(entry),
            None => Ok(false),
        }
    }

    /// Track the hotspot under the pointer, given as `(field, col, row)`
    pub fn hover(&mut self, pointer: Option<(Rect, u16, u16)>) {
        self.hovered = pointer.and_then(|(field, col, row)| {
            hotspot_at(self.hotspots(), field, col, row).map(|h| h.entry)
        });
    }

    /// Speed through the intro and any typing speech bubble
    pub fn skip(&mut self) {
        if let Some(stage) = self.intro.skip() {
            self.enter_stage(stage);
        }
        if let Some(speech) = self.speech.as_mut() {
            speech.skip();
        }
    }

    /// React to a terminal resize.
    ///
    /// Crossing the breakpoint cancels any walk and puts the mascot on the
    /// new layout's default spot.
    pub fn resize(&mut self, columns: u16) {
        let Some(mode) = self.viewport.observe_columns(columns) else {
            return;
        };

        if self.choreographer.is_walking() {
            tracing::info!(%mode, phase = ?self.choreographer.phase(), "layout changed mid-walk, cancelling");
        }
        self.choreographer.cancel();
        let default = self.layout().default;
        self.state.reset(default);
        self.sprite.snap(&self.state);
        self.fade.set_active(false);
        self.hovered = None;
        tracing::debug!(%mode, position = %default, "viewport mode changed");
    }

    pub fn tick(&mut self, dt: Duration, router: &mut dyn Router) {
        if let Some(stage) = self.intro.tick(dt) {
            self.enter_stage(stage);
        }

        self.choreographer.tick(dt, &mut self.state, router);
        self.sprite.sync(&self.state, self.choreographer.current_leg_duration());
        self.sprite.tick(dt);

        if let Some(speech) = self.speech.as_mut() {
            speech.tick(dt);
        }

        self.fade.set_active(self.choreographer.is_transitioning());
        self.fade.tick(dt);
        self.motes.tick(dt.as_secs_f32());
        self.pulse.update(dt.as_secs_f32());
    }

    fn enter_stage(&mut self, stage: IntroStage) {
        match stage {
            // The walk-in is drawn from `Intro::walk_in_progress`
            IntroStage::Empty | IntroStage::WalkIn => {}
            IntroStage::Greeting | IntroStage::Ready => {
                if self.speech.is_none() && !self.choreographer.is_walking() {
                    self.sprite.set_pose(Pose::Idle);
                    self.sprite.set_message(Some(self.greeting.clone()));
                    self.speech = Some(Typewriter::new(self.greeting.clone()));
                }
            }
        }
    }

    /// Stop everything pending before the view goes away
    pub fn teardown(&mut self) {
        self.choreographer.cancel();
        tracing::debug!("map torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positioning::Position;
    use crate::state::{Direction, Page};

    #[derive(Default)]
    struct RecordingRouter {
        visits: Vec<String>,
    }

    impl Router for RecordingRouter {
        fn navigate(&mut self, target: &str) {
            self.visits.push(target.to_string());
        }
    }

    const WIDE: u16 = 120;
    const NARROW: u16 = 60;

    fn fresh(columns: u16) -> MapView {
        MapView::mount(&VillageConfig::default(), &Route::default(), columns, false)
    }

    #[test]
    fn test_fresh_mount_uses_mode_default() {
        let map = fresh(WIDE);
        assert_eq!(map.mode(), ViewportMode::Desktop);
        assert_eq!(map.position_state().position(), Position::new(50.0, 47.0));

        let map = fresh(NARROW);
        assert_eq!(map.mode(), ViewportMode::Mobile);
        assert_eq!(map.position_state().position(), Position::new(50.0, 60.0));
    }

    #[test]
    fn test_entry_route_starts_at_crossroad() {
        let route = Route::new(Page::Map, Some(EntryDirection::Up));
        let map = MapView::mount(&VillageConfig::default(), &route, WIDE, true);
        assert_eq!(map.position_state().position(), Position::new(50.0, 56.0));
        assert_eq!(map.position_state().direction(), Direction::Front);
        assert!(map.intro().hotspots_ready());
    }

    #[test]
    fn test_idle_resize_resets_to_mode_default() {
        let mut map = fresh(WIDE);
        map.resize(NARROW);
        assert_eq!(map.mode(), ViewportMode::Mobile);
        assert_eq!(map.position_state().position(), Position::new(50.0, 60.0));
        assert_eq!(map.position_state().direction(), Direction::Front);

        map.resize(WIDE);
        assert_eq!(map.position_state().position(), Position::new(50.0, 47.0));
    }

    #[test]
    fn test_resize_mid_walk_cancels() {
        let mut map = fresh(WIDE);
        let mut router = RecordingRouter::default();

        assert!(map.activate(EntryDirection::Up).unwrap());
        map.tick(Duration::from_millis(100), &mut router);
        assert!(map.is_walking());

        map.resize(NARROW);
        assert!(!map.is_walking());
        assert_eq!(map.walk_phase(), WalkPhase::Idle);

        for _ in 0..100 {
            map.tick(Duration::from_millis(100), &mut router);
        }
        assert!(router.visits.is_empty());
        assert_eq!(map.position_state().position(), Position::new(50.0, 60.0));
    }

    #[test]
    fn test_click_on_hotspot_walks_and_navigates() {
        let mut map = fresh(WIDE);
        let mut router = RecordingRouter::default();

        let field = Rect::new(1, 1, 118, 38);
        let contact = map
            .hotspots()
            .iter()
            .find(|h| h.entry == EntryDirection::Right)
            .map(|h| h.bounds.to_cells(field))
            .unwrap();
        let (x, y) = (contact.x + contact.width / 2, contact.y + contact.height / 2);
        assert!(map.click(field, x, y).unwrap());
        assert!(!map.click(field, x, y).unwrap());

        for _ in 0..100 {
            map.tick(Duration::from_millis(50), &mut router);
        }
        assert_eq!(router.visits, vec!["/contact?entry=right".to_string()]);
        assert_eq!(map.position_state().direction(), Direction::Back);
        assert_eq!(map.fade_opacity(), 1.0);
    }

    #[test]
    fn test_clicks_ignored_during_intro() {
        let mut map = MapView::mount(&VillageConfig::default(), &Route::default(), WIDE, true);
        assert!(map.hotspots().is_empty());
        assert!(!map.activate(EntryDirection::Left).unwrap());

        let mut router = RecordingRouter::default();
        map.tick(Duration::from_millis(2600), &mut router);
        assert!(map.speech_text().is_some());
        map.skip();
        assert!(map.intro().hotspots_ready());
        assert_eq!(map.speech_text(), Some(VillageConfig::default().greeting.as_str()));
        assert!(map.activate(EntryDirection::Left).unwrap());
        assert_eq!(map.speech_text(), None);
    }

    #[test]
    fn test_click_outside_hotspots_does_nothing() {
        let mut map = fresh(WIDE);
        assert!(!map.click(Rect::new(1, 1, 118, 38), 2, 37).unwrap());
        assert!(!map.is_walking());
    }

    #[test]
    fn test_teardown_cancels_pending_walk() {
        let mut map = fresh(WIDE);
        let mut router = RecordingRouter::default();
        map.activate(EntryDirection::Left).unwrap();
        map.teardown();
        map.tick(Duration::from_secs(10), &mut router);
        assert!(router.visits.is_empty());
    }
}
