use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use crate::error::ChoreographyError;
use crate::positioning::{PercentRect, Position};

use super::viewport::ViewportMode;

/// Which side of a destination's door the mascot approaches from.
///
/// Also used as the `entry` query tag on routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryDirection {
    Left,
    Up,
    Right,
}

impl EntryDirection {
    pub const ALL: [EntryDirection; 3] = [Self::Left, Self::Up, Self::Right];

    pub fn tag(&self) -> &'static str {
        match self {
            EntryDirection::Left => "left",
            EntryDirection::Up => "up",
            EntryDirection::Right => "right",
        }
    }
}

impl fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntryDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(EntryDirection::Left),
            "up" => Ok(EntryDirection::Up),
            "right" => Ok(EntryDirection::Right),
            _ => Err(()),
        }
    }
}

/// Door coordinates for one layout, as written in the config file.
///
/// Entries are optional here so a missing door is reported by name
/// instead of as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoints {
    #[serde(default)]
    pub left: Option<Position>,
    #[serde(default)]
    pub up: Option<Position>,
    #[serde(default)]
    pub right: Option<Position>,
}

impl Waypoints {
    pub fn get(&self, entry: EntryDirection) -> Option<Position> {
        match entry {
            EntryDirection::Left => self.left,
            EntryDirection::Up => self.up,
            EntryDirection::Right => self.right,
        }
    }
}

/// A clickable region on the map tied to a destination route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub name: String,
    pub path: String,
    pub entry: EntryDirection,
    pub bounds: PercentRect,
}

impl Hotspot {
    pub fn new(name: &str, path: &str, entry: EntryDirection, bounds: PercentRect) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            entry,
            bounds,
        }
    }
}

/// Find the hotspot drawn under the cell `(col, row)` of a map `area`
pub fn hotspot_at(hotspots: &[Hotspot], area: Rect, col: u16, row: u16) -> Option<&Hotspot> {
    hotspots.iter().find(|h| h.bounds.covers_cell(area, col, row))
}

/// Read-only `(mode, entry) -> door` lookup used by the choreography
#[derive(Debug, Clone, Default)]
pub struct WaypointTable {
    doors: HashMap<(ViewportMode, EntryDirection), Position>,
}

impl WaypointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mode: ViewportMode, entry: EntryDirection, door: Position) {
        self.doors.insert((mode, entry), door);
    }

    /// Build a table from per-mode config, keeping whatever doors are present
    pub fn from_layouts(desktop: &Waypoints, mobile: &Waypoints) -> Self {
        let mut table = Self::new();
        for (mode, waypoints) in [(ViewportMode::Desktop, desktop), (ViewportMode::Mobile, mobile)] {
            for entry in EntryDirection::ALL {
                if let Some(door) = waypoints.get(entry) {
                    table.insert(mode, entry, door);
                }
            }
        }
        table
    }

    pub fn door(&self, mode: ViewportMode, entry: EntryDirection) -> Result<Position, ChoreographyError> {
        self.doors
            .get(&(mode, entry))
            .copied()
            .ok_or(ChoreographyError::MissingWaypoint { mode, entry })
    }

    /// The first `(mode, entry)` pair with no door, if any
    pub fn first_missing(&self) -> Option<(ViewportMode, EntryDirection)> {
        ViewportMode::ALL
            .into_iter()
            .flat_map(|mode| EntryDirection::ALL.into_iter().map(move |entry| (mode, entry)))
            .find(|key| !self.doors.contains_key(key))
    }
}
