//! Village configuration.
//!
//! Everything has a default, so the app runs without a config file. A file
//! passed with `--config` is JSON and may override any subset of fields:
//!
//! ```json
//! { "breakpoint_px": 900, "timing": { "ms_per_percent": 30 } }
//! ```
//!
//! Validation runs before anything is drawn. A layout missing a door is
//! fatal, so the walk never has to invent coordinates.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::positioning::{PercentRect, Position};
use crate::state::{EntryDirection, Hotspot, ViewportMode, WaypointTable, Waypoints};

/// Walk and fade timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Leg duration per percent of distance walked
    pub ms_per_percent: f32,
    /// Shortest leg, so tiny moves stay visible
    pub min_leg_ms: u64,
    /// Pause between raising the fade and changing page
    pub fade_delay_ms: u64,
    /// Black hold when a page is shown
    pub page_fade_ms: u64,
}

impl Timing {
    pub fn min_leg(&self) -> Duration {
        Duration::from_millis(self.min_leg_ms)
    }

    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    pub fn page_fade(&self) -> Duration {
        Duration::from_millis(self.page_fade_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            ms_per_percent: 40.0,
            min_leg_ms: 200,
            fade_delay_ms: 400,
            page_fade_ms: 500,
        }
    }
}

/// Map layout for one viewport mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeLayout {
    /// Where the mascot stands on a fresh visit
    pub default: Position,
    /// Where the mascot stands when coming back from a page
    pub crossroad: Position,
    #[serde(default)]
    pub waypoints: Waypoints,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl ModeLayout {
    pub fn desktop() -> Self {
        Self {
            default: Position::new(50.0, 47.0),
            crossroad: Position::new(50.0, 56.0),
            waypoints: Waypoints {
                left: Some(Position::new(22.0, 52.0)),
                up: Some(Position::new(43.0, 41.0)),
                right: Some(Position::new(76.0, 50.0)),
            },
            hotspots: vec![
                Hotspot::new("Projects", "/projects", EntryDirection::Left, PercentRect::new(8.0, 28.0, 20.0, 24.0)),
                Hotspot::new("About", "/about", EntryDirection::Up, PercentRect::new(35.0, 12.0, 16.0, 29.0)),
                Hotspot::new("Contact", "/contact", EntryDirection::Right, PercentRect::new(70.0, 26.0, 20.0, 24.0)),
            ],
        }
    }

    pub fn mobile() -> Self {
        Self {
            default: Position::new(50.0, 60.0),
            crossroad: Position::new(50.0, 70.0),
            waypoints: Waypoints {
                left: Some(Position::new(20.0, 66.0)),
                up: Some(Position::new(48.0, 44.0)),
                right: Some(Position::new(80.0, 64.0)),
            },
            hotspots: vec![
                Hotspot::new("Projects", "/projects", EntryDirection::Left, PercentRect::new(4.0, 46.0, 28.0, 20.0)),
                Hotspot::new("About", "/about", EntryDirection::Up, PercentRect::new(34.0, 22.0, 30.0, 22.0)),
                Hotspot::new("Contact", "/contact", EntryDirection::Right, PercentRect::new(68.0, 44.0, 28.0, 20.0)),
            ],
        }
    }

    fn validate(&self, mode: ViewportMode) -> Result<(), ConfigError> {
        if !self.default.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate { mode, what: "default" });
        }
        if !self.crossroad.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate { mode, what: "crossroad" });
        }
        for entry in EntryDirection::ALL {
            if let Some(door) = self.waypoints.get(entry) {
                if !door.is_finite() {
                    return Err(ConfigError::NonFiniteCoordinate { mode, what: "waypoint" });
                }
            }
        }
        if self.hotspots.is_empty() {
            return Err(ConfigError::NoHotspots { mode });
        }
        Ok(())
    }
}

/// Complete app configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    /// Widths below this many logical pixels use the mobile layout
    pub breakpoint_px: u32,
    /// Logical pixels per terminal column
    pub cell_width_px: u32,
    pub timing: Timing,
    pub desktop: ModeLayout,
    pub mobile: ModeLayout,
    /// Base URL of the contact form endpoint
    pub contact_endpoint: String,
    /// Greeting shown in the intro speech bubble
    pub greeting: String,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768,
            cell_width_px: 8,
            timing: Timing::default(),
            desktop: ModeLayout::desktop(),
            mobile: ModeLayout::mobile(),
            contact_endpoint: "http://localhost:3000".to_string(),
            greeting: "Hello, my name is Matteo. Please select what you are looking for."
                .to_string(),
        }
    }
}

impl VillageConfig {
    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakpoint_px == 0 || self.cell_width_px == 0 {
            return Err(ConfigError::InvalidBreakpoint);
        }
        if !self.timing.ms_per_percent.is_finite() || self.timing.ms_per_percent < 0.0 {
            return Err(ConfigError::InvalidTiming("ms_per_percent must be a non-negative number"));
        }
        if self.timing.min_leg_ms == 0 {
            return Err(ConfigError::InvalidTiming("min_leg_ms must be positive"));
        }
        if let Some((mode, entry)) = self.waypoint_table().first_missing() {
            return Err(ConfigError::MissingWaypoint { mode, entry });
        }
        self.desktop.validate(ViewportMode::Desktop)?;
        self.mobile.validate(ViewportMode::Mobile)?;
        Ok(())
    }

    pub fn layout(&self, mode: ViewportMode) -> &ModeLayout {
        match mode {
            ViewportMode::Desktop => &self.desktop,
            ViewportMode::Mobile => &self.mobile,
        }
    }

    pub fn waypoint_table(&self) -> WaypointTable {
        WaypointTable::from_layouts(&self.desktop.waypoints, &self.mobile.waypoints)
    }
}
