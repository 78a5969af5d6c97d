pub mod colors;
pub mod map;
pub mod mascot;
pub mod overlay;
pub mod pages;
pub mod ui;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};

pub use map::MapWidget;
pub use overlay::{FadeOverlay, LoadingScreen};
pub use pages::{AboutWidget, ContactWidget, EdgeArrows, ProjectsWidget};
pub use ui::{HelpOverlay, StatusBar};

/// Interpolate between two colors
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);

    let (r1, g1, b1) = match from {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        _ => (0.0, 0.0, 0.0),
    };

    let (r2, g2, b2) = match to {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        _ => (255.0, 255.0, 255.0),
    };

    Color::Rgb(
        (r1 + (r2 - r1) * t) as u8,
        (g1 + (g2 - g1) * t) as u8,
        (b1 + (b2 - b1) * t) as u8,
    )
}

/// Write `text` starting at `(x, y)`, clipped to `clip`.
///
/// Returns the column after the last character written.
pub(crate) fn draw_text(buf: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) -> u16 {
    if y < clip.y || y >= clip.bottom() {
        return x;
    }
    let mut cx = x;
    for ch in text.chars() {
        if cx >= clip.right() {
            break;
        }
        if cx >= clip.x {
            buf[(cx, y)].set_char(ch).set_style(style);
        }
        cx += 1;
    }
    cx
}

/// Write `text` centered on row `y` of `clip`
pub(crate) fn draw_centered(buf: &mut Buffer, clip: Rect, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    let x = clip.x + clip.width.saturating_sub(len) / 2;
    draw_text(buf, clip, x, y, text, style);
}

/// Paint every cell of `area` with `style`, blanking the contents
pub(crate) fn fill(buf: &mut Buffer, area: Rect, style: Style) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_char(' ').set_style(style);
        }
    }
}

/// Rounded box outline
pub(crate) fn draw_box(buf: &mut Buffer, area: Rect, style: Style) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let right = area.right() - 1;
    let bottom = area.bottom() - 1;

    for x in area.x..=right {
        buf[(x, area.y)].set_char('─').set_style(style);
        buf[(x, bottom)].set_char('─').set_style(style);
    }
    for y in area.y..=bottom {
        buf[(area.x, y)].set_char('│').set_style(style);
        buf[(right, y)].set_char('│').set_style(style);
    }

    buf[(area.x, area.y)].set_char('╭').set_style(style);
    buf[(right, area.y)].set_char('╮').set_style(style);
    buf[(area.x, bottom)].set_char('╰').set_style(style);
    buf[(right, bottom)].set_char('╯').set_style(style);
}

/// Greedy word wrap; words longer than `width` are split
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let used = line.chars().count();
        if used > 0 && used + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_color() {
        let from = Color::Rgb(0, 0, 0);
        let to = Color::Rgb(200, 100, 50);
        assert_eq!(lerp_color(from, to, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(lerp_color(from, to, 2.0), to);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("hello there friend", 11), vec!["hello there", "friend"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert!(wrap("", 10).is_empty());
        assert!(wrap("text", 0).is_empty());
    }

    #[test]
    fn test_draw_text_clips() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        let end = draw_text(&mut buf, area, 2, 0, "hello", Style::default());
        assert_eq!(end, 5);
        assert_eq!(buf[(2, 0)].symbol(), "h");
        assert_eq!(buf[(4, 0)].symbol(), "l");

        draw_text(&mut buf, area, 0, 3, "off", Style::default());
    }
}
