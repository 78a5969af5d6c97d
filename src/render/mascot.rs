use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::positioning::Position;
use crate::state::{Direction, Pose, DEFAULT_SIZE};

use super::colors::{BUBBLE_BG, BUBBLE_TEXT, MASCOT_ACCENT, MASCOT_BODY};
use super::{draw_text, fill, wrap};

/// Sprite is drawn this many cells wide
pub const SPRITE_WIDTH: u16 = 5;
const SPRITE_HEIGHT: u16 = 2;

const BUBBLE_MAX_WIDTH: usize = 28;

fn head(direction: Direction, pose: Pose) -> &'static str {
    match (direction, pose) {
        (Direction::Back, _) => "(   )",
        (Direction::Left, _) => "(o_ )",
        (Direction::Right, _) => "( _o)",
        (Direction::Front, Pose::Speak) => "(^o^)",
        (Direction::Front, _) => "(^_^)",
    }
}

fn body(pose: Pose, step: bool) -> &'static str {
    match (pose, step) {
        (Pose::Walk, false) => " / \\ ",
        (Pose::Walk, true) => "  |  ",
        _ => " /|\\ ",
    }
}

/// The mascot, anchored at its feet.
///
/// `size` is the sprite height in percent of the area. When that comes to
/// fewer rows than the full sprite needs, only the head is drawn.
pub struct MascotWidget {
    position: Position,
    direction: Direction,
    pose: Pose,
    step: bool,
    size: f32,
}

impl MascotWidget {
    pub fn new(position: Position, direction: Direction, pose: Pose) -> Self {
        Self {
            position,
            direction,
            pose,
            step: false,
            size: DEFAULT_SIZE,
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn step(mut self, step: bool) -> Self {
        self.step = step;
        self
    }

    /// Cell of the feet row's center inside `area`
    pub fn anchor(position: Position, area: Rect) -> (u16, u16) {
        let (x, y) = position.to_terminal(area.width, area.height);
        (area.x + x, area.y + y)
    }
}

impl Widget for MascotWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < SPRITE_WIDTH || area.height < SPRITE_HEIGHT {
            return;
        }

        let (cx, feet_y) = Self::anchor(self.position, area);
        let left = cx.saturating_sub(SPRITE_WIDTH / 2).max(area.x);
        let head_style = Style::default().fg(MASCOT_BODY).add_modifier(Modifier::BOLD);

        let rows = (self.size / 100.0 * area.height as f32).round() as u16;
        if rows < SPRITE_HEIGHT {
            draw_text(buf, area, left, feet_y, head(self.direction, self.pose), head_style);
            return;
        }

        let head_y = feet_y.saturating_sub(1).max(area.y);
        let feet_y = head_y + 1;
        let body_style = Style::default().fg(MASCOT_ACCENT);

        draw_text(buf, area, left, head_y, head(self.direction, self.pose), head_style);
        draw_text(buf, area, left, feet_y, body(self.pose, self.step), body_style);
    }
}

/// Speech bubble drawn above the mascot
pub struct SpeechBubble<'a> {
    text: &'a str,
    anchor: Position,
}

impl<'a> SpeechBubble<'a> {
    pub fn new(text: &'a str, anchor: Position) -> Self {
        Self { text, anchor }
    }
}

impl Widget for SpeechBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let max_width = BUBBLE_MAX_WIDTH.min(area.width.saturating_sub(4) as usize);
        let lines = wrap(self.text, max_width);
        if lines.is_empty() {
            return;
        }

        let text_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = text_width + 4;
        let height = lines.len() as u16 + 2;

        let (cx, feet_y) = MascotWidget::anchor(self.anchor, area);
        // Bubble bottom sits one row above the head, tail included
        let head_y = feet_y.saturating_sub(1);
        if head_y < area.y + height + 1 {
            return;
        }
        let top = head_y - height - 1;
        let left = cx
            .saturating_sub(width / 2)
            .clamp(area.x, area.right().saturating_sub(width));

        let bubble = Rect::new(left, top, width, height);
        let bg = Style::default().bg(BUBBLE_BG);
        let text_style = Style::default().fg(BUBBLE_TEXT).bg(BUBBLE_BG);
        fill(buf, bubble, bg);

        for (i, line) in lines.iter().enumerate() {
            draw_text(buf, area, left + 2, top + 1 + i as u16, line, text_style);
        }

        let tail_x = cx.clamp(bubble.x + 1, bubble.right().saturating_sub(2));
        let tail_style = Style::default().fg(BUBBLE_BG);
        draw_text(buf, area, tail_x, top + height, "▼", tail_style);
    }
}
