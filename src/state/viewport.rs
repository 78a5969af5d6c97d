use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout family. The map art differs by aspect ratio, so waypoints and
/// hotspots are configured once per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMode {
    Mobile,
    #[default]
    Desktop,
}

impl ViewportMode {
    pub const ALL: [ViewportMode; 2] = [Self::Desktop, Self::Mobile];

    /// Classify a width in logical pixels against a breakpoint
    pub fn classify(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px < breakpoint_px {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewportMode::Mobile => "mobile",
            ViewportMode::Desktop => "desktop",
        }
    }
}

impl fmt::Display for ViewportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks the current viewport mode across resize events.
///
/// Owned by the map view. `observe` reports only breakpoint crossings so the
/// owner can reset its state exactly once per change.
#[derive(Debug, Clone)]
pub struct ViewportWatcher {
    breakpoint_px: u32,
    cell_width_px: u32,
    mode: ViewportMode,
}

impl ViewportWatcher {
    pub fn new(breakpoint_px: u32, cell_width_px: u32, initial_width_px: u32) -> Self {
        Self {
            breakpoint_px,
            cell_width_px,
            mode: ViewportMode::classify(initial_width_px, breakpoint_px),
        }
    }

    /// Start from a terminal width in columns
    pub fn for_columns(breakpoint_px: u32, cell_width_px: u32, columns: u16) -> Self {
        Self::new(breakpoint_px, cell_width_px, columns as u32 * cell_width_px)
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Feed a new width in logical pixels; returns the new mode on a crossing
    pub fn observe(&mut self, width_px: u32) -> Option<ViewportMode> {
        let mode = ViewportMode::classify(width_px, self.breakpoint_px);
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(mode)
    }

    /// Feed a new terminal width in columns
    pub fn observe_columns(&mut self, columns: u16) -> Option<ViewportMode> {
        self.observe(columns as u32 * self.cell_width_px)
    }
}
