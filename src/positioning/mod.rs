mod interpolation;

pub use interpolation::*;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// A 2D position in percentages of the map area (0.0 to 100.0)
///
/// The map is drawn at whatever size the terminal offers, so positions are
/// never stored as cells. Conversion happens only when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to terminal coordinates inside an area of the given size
    pub fn to_terminal(&self, width: u16, height: u16) -> (u16, u16) {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        let col = (self.x / 100.0 * (width - 1) as f32).round().max(0.0) as u16;
        let row = (self.y / 100.0 * (height - 1) as f32).round().max(0.0) as u16;
        (col.min(width - 1), row.min(height - 1))
    }

    /// Linear interpolation toward another position
    pub fn lerp(&self, target: &Position, t: f32) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    /// Distance to another position, in percent
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Clamp position to the map
    pub fn clamp(&self) -> Position {
        Position {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(50.0, 50.0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}%, {:.1}%)", self.x, self.y)
    }
}

/// An axis-aligned box in percentages, used for clickable hotspots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PercentRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Cells covered inside `area`.
    ///
    /// Drawing and hit-testing both go through here, so a click on any drawn
    /// cell lands inside the box.
    pub fn to_cells(&self, area: Rect) -> Rect {
        let (x0, y0) = Position::new(self.left, self.top).to_terminal(area.width, area.height);
        let (x1, y1) = Position::new(self.left + self.width, self.top + self.height)
            .to_terminal(area.width, area.height);
        Rect::new(
            area.x + x0,
            area.y + y0,
            x1.saturating_sub(x0).max(1),
            y1.saturating_sub(y0).max(1),
        )
        .intersection(area)
    }

    /// Whether the cell at `(col, row)` is covered inside `area`
    pub fn covers_cell(&self, area: Rect, col: u16, row: u16) -> bool {
        let cells = self.to_cells(area);
        col >= cells.left() && col < cells.right() && row >= cells.top() && row < cells.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_round_trip_corners() {
        assert_eq!(Position::new(0.0, 0.0).to_terminal(101, 51), (0, 0));
        assert_eq!(Position::new(100.0, 100.0).to_terminal(101, 51), (100, 50));
        assert_eq!(Position::new(50.0, 50.0).to_terminal(101, 51), (50, 25));
    }

    #[test]
    fn test_to_terminal_zero_area() {
        assert_eq!(Position::new(40.0, 40.0).to_terminal(0, 10), (0, 0));
    }

    #[test]
    fn test_rect_covers_its_drawn_cells() {
        let area = Rect::new(1, 1, 118, 38);
        let rect = PercentRect::new(8.0, 28.0, 20.0, 24.0);
        let cells = rect.to_cells(area);
        assert!(rect.covers_cell(area, cells.left(), cells.top()));
        assert!(rect.covers_cell(area, cells.right() - 1, cells.bottom() - 1));
        assert!(!rect.covers_cell(area, cells.left() - 1, cells.top()));
        assert!(!rect.covers_cell(area, cells.left(), cells.bottom()));
    }

    #[test]
    fn test_to_cells_stays_inside() {
        let area = Rect::new(1, 1, 50, 20);
        let rect = PercentRect::new(90.0, 90.0, 30.0, 30.0).to_cells(area);
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}
