use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::choreography::WalkPhase;
use crate::positioning::Position;
use crate::state::{Route, ViewportMode};

use super::{draw_box, draw_centered, draw_text, fill};

/// Status bar at the bottom of the screen
pub struct StatusBar<'a> {
    route: &'a Route,
    mode: Option<ViewportMode>,
    phase: Option<WalkPhase>,
    mascot: Option<Position>,
    fps: u32,
    hint: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(route: &'a Route) -> Self {
        Self {
            route,
            mode: None,
            phase: None,
            mascot: None,
            fps: 30,
            hint: None,
        }
    }

    /// Viewport mode, shown only on the map
    pub fn mode(mut self, mode: Option<ViewportMode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn phase(mut self, phase: Option<WalkPhase>) -> Self {
        self.phase = phase;
        self
    }

    /// Mascot's logical spot, where it stands or is walking to
    pub fn mascot(mut self, position: Option<Position>) -> Self {
        self.mascot = position;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Replaces the default key hint on the right
    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(Color::Rgb(25, 35, 25));
        fill(buf, Rect::new(area.x, area.y, area.width, 1), bg_style);

        let label_style = Style::default().fg(Color::Rgb(110, 130, 110)).bg(Color::Rgb(25, 35, 25));
        let value_style = Style::default().fg(Color::Rgb(190, 210, 190)).bg(Color::Rgb(25, 35, 25));
        let accent_style = Style::default()
            .fg(Color::Rgb(140, 210, 120))
            .bg(Color::Rgb(25, 35, 25))
            .add_modifier(Modifier::BOLD);

        let mut x = draw_text(buf, area, area.x + 1, area.y, "⌂ VILLAGE", accent_style) + 2;
        x = draw_text(buf, area, x, area.y, &self.route.to_string(), value_style) + 2;

        if let Some(mode) = self.mode {
            x = draw_text(buf, area, x, area.y, &format!("[{}]", mode), label_style) + 2;
        }

        if let Some(phase) = self.phase.filter(|p| *p != WalkPhase::Idle) {
            let walk_style = Style::default()
                .fg(Color::Rgb(255, 200, 100))
                .bg(Color::Rgb(25, 35, 25));
            x = draw_text(buf, area, x, area.y, &format!("{:?}", phase), walk_style) + 2;
        }

        if let Some(position) = self.mascot {
            x = draw_text(buf, area, x, area.y, &format!("@ {}", position), label_style) + 2;
        }

        draw_text(buf, area, x, area.y, &format!("{} fps", self.fps), label_style);

        let help_text = self.hint.unwrap_or("?:help q:quit");
        let help_len = help_text.chars().count() as u16;
        if area.width > help_len + 1 {
            let help_x = area.x + area.width - help_len - 1;
            if help_x > x {
                draw_text(buf, area, help_x, area.y, help_text, label_style);
            }
        }
    }
}

/// Help overlay widget
pub struct HelpOverlay;

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let box_width = 46u16;
        let box_height = 15u16;
        if area.width < box_width || area.height < box_height {
            return;
        }
        let help = Rect::new(
            area.x + (area.width - box_width) / 2,
            area.y + (area.height - box_height) / 2,
            box_width,
            box_height,
        );

        let box_bg = Color::Rgb(30, 40, 30);
        fill(buf, help, Style::default().bg(box_bg));
        let border_style = Style::default().fg(Color::Rgb(140, 210, 120)).bg(box_bg);
        draw_box(buf, help, border_style);
        draw_centered(buf, help, help.y, " Village Controls ", border_style.add_modifier(Modifier::BOLD));

        let key_style = Style::default()
            .fg(Color::Rgb(230, 220, 120))
            .bg(box_bg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::Rgb(190, 200, 190)).bg(box_bg);

        let controls = [
            ("click", "Walk to a building"),
            ("←/1", "Projects"),
            ("↑/2", "About"),
            ("→/3", "Contact"),
            ("Space", "Skip intro / speech"),
            ("Esc, b", "Back to the village"),
            ("Tab", "Next field (contact)"),
            ("Enter", "Send message (contact)"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ];

        let mut y = help.y + 2;
        for (key, desc) in controls {
            if y >= help.bottom() - 2 {
                break;
            }
            draw_text(buf, help, help.x + 3, y, key, key_style);
            draw_text(buf, help, help.x + 14, y, desc, desc_style);
            y += 1;
        }

        let footer_style = Style::default().fg(Color::Rgb(110, 130, 110)).bg(box_bg);
        draw_centered(buf, help, help.bottom() - 2, "Press any key to close", footer_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntryDirection, Page};

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_status_bar_shows_route_and_phase() {
        let route = Route::new(Page::About, Some(EntryDirection::Up));
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&route)
            .phase(Some(WalkPhase::LegTwo))
            .mascot(Some(Position::new(43.0, 41.0)))
            .render(area, &mut buf);
        let text = row(&buf, 0);
        assert!(text.contains("/about?entry=up"));
        assert!(text.contains("LegTwo"));
        assert!(text.contains("@ (43.0%, 41.0%)"));
        assert!(text.contains("q:quit"));
    }

    #[test]
    fn test_help_overlay_lists_keys() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        HelpOverlay.render(area, &mut buf);
        assert!((0..area.height).any(|y| row(&buf, y).contains("Back to the village")));
    }
}
