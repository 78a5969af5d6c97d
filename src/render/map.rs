use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::animation::IntroStage;
use crate::pages::MapView;
use crate::positioning::{ease_out_cubic, Position};
use crate::state::{Direction, Hotspot, Pose};

use super::colors::{
    building_color, dim_color, mote_color, BORDER, GRASS, GRASS_DARK, LABEL, PATH, ROOF,
};
use super::mascot::{MascotWidget, SpeechBubble};
use super::overlay::FadeOverlay;
use super::{draw_centered, draw_text, lerp_color};

/// Where the mascot walks in from during the intro, in percent
const WALK_IN_FROM_X: f32 = -10.0;

/// Map area inside the border
pub fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// The village: grass, paths, buildings, motes, mascot and the walk fade
pub struct MapWidget<'a> {
    map: &'a MapView,
}

impl<'a> MapWidget<'a> {
    pub fn new(map: &'a MapView) -> Self {
        Self { map }
    }

    fn render_ground(&self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            let color = if (y - area.y) % 2 == 0 { GRASS } else { GRASS_DARK };
            for x in area.left()..area.right() {
                buf[(x, y)].set_char(' ').set_style(Style::default().bg(color));
            }
        }

        // Tufts on a fixed pattern so they don't shimmer between frames
        let tuft = Style::default().fg(dim_color(GRASS_DARK, 0.7));
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if (x as u32 * 7 + y as u32 * 13) % 23 == 0 {
                    buf[(x, y)].set_char('"').set_style(tuft);
                }
            }
        }
    }

    /// Dirt paths trace the same L the mascot walks: across, then up or down
    fn render_paths(&self, area: Rect, buf: &mut Buffer) {
        let layout = self.map.layout();
        let (cx, cy) = layout.crossroad.to_terminal(area.width, area.height);
        let path_style = Style::default().bg(PATH).fg(dim_color(PATH, 0.75));

        for door in [layout.waypoints.left, layout.waypoints.up, layout.waypoints.right]
            .into_iter()
            .flatten()
        {
            let (dx, dy) = door.to_terminal(area.width, area.height);
            for x in cx.min(dx)..=cx.max(dx) {
                buf[(area.x + x, area.y + cy)].set_char('·').set_style(path_style);
            }
            for y in cy.min(dy)..=cy.max(dy) {
                buf[(area.x + dx, area.y + y)].set_char('·').set_style(path_style);
            }
        }
    }

    /// Draw a building; its label and hover glow only once it is `clickable`
    fn render_building(&self, hotspot: &Hotspot, clickable: bool, area: Rect, buf: &mut Buffer) {
        let rect = hotspot.bounds.to_cells(area);
        if rect.is_empty() {
            return;
        }

        let hovered = clickable && self.map.hovered() == Some(hotspot.entry);
        let base = building_color(hotspot.entry);
        let wall = if hovered {
            lerp_color(base, ratatui::style::Color::Rgb(255, 255, 255), 1.0 - self.map.hover_glow())
        } else {
            base
        };

        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                buf[(x, y)].set_char(' ').set_style(Style::default().bg(wall));
            }
        }
        for x in rect.left()..rect.right() {
            buf[(x, rect.y)].set_char('▄').set_style(Style::default().fg(ROOF).bg(wall));
        }

        // Door in the middle of the bottom row
        if rect.height > 2 {
            let door_x = rect.x + rect.width / 2;
            buf[(door_x, rect.bottom() - 1)]
                .set_char('▮')
                .set_style(Style::default().fg(dim_color(base, 0.4)).bg(wall));
        }

        let mut label_style = Style::default().fg(LABEL).bg(wall);
        if hovered {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if clickable && rect.height > 1 {
            draw_centered(buf, rect, rect.y + rect.height / 2, &hotspot.name, label_style);
        }
    }

    fn render_motes(&self, area: Rect, buf: &mut Buffer) {
        for (pos, brightness, index) in self.map.motes().current() {
            let (x, y) = pos.to_terminal(area.width, area.height);
            let cell = &mut buf[(area.x + x, area.y + y)];
            let ch = if brightness > 0.85 { '✦' } else { '·' };
            cell.set_char(ch).set_fg(dim_color(mote_color(index), brightness));
        }
    }

    fn mascot_position(&self) -> Option<Position> {
        let sprite = self.map.sprite();
        let intro = self.map.intro();
        match intro.stage() {
            IntroStage::Empty => None,
            IntroStage::WalkIn => {
                let target = sprite.display_position();
                let start = Position::new(WALK_IN_FROM_X, target.y);
                Some(start.lerp(&target, ease_out_cubic(intro.walk_in_progress())))
            }
            IntroStage::Greeting | IntroStage::Ready => Some(sprite.display_position()),
        }
    }

    fn render_border(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(BORDER);
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
        buf[(area.x, area.y)].set_char('┌').set_style(style);
        buf[(right, area.y)].set_char('┐').set_style(style);
        buf[(area.x, bottom)].set_char('└').set_style(style);
        buf[(right, bottom)].set_char('┘').set_style(style);

        let title = format!(" village · {} ", self.map.mode());
        draw_text(buf, area, area.x + 2, area.y, &title, style.add_modifier(Modifier::BOLD));
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 8 || area.height < 6 {
            return;
        }
        let field = inner(area);

        self.render_ground(field, buf);
        self.render_paths(field, buf);
        self.render_motes(field, buf);
        let clickable = self.map.hotspots();
        for hotspot in &self.map.layout().hotspots {
            let ready = clickable.iter().any(|h| h.entry == hotspot.entry);
            self.render_building(hotspot, ready, field, buf);
        }

        if let Some(pos) = self.mascot_position() {
            let sprite = self.map.sprite();
            let intro = self.map.intro();
            let (direction, pose, step) =
                if intro.stage() == IntroStage::WalkIn && intro.walk_in_progress() < 1.0 {
                    let step = (intro.walk_in_progress() * 12.0) as u32 % 2 == 1;
                    (Direction::Right, Pose::Walk, step)
                } else {
                    (sprite.direction(), sprite.pose(), sprite.step_frame())
                };
            MascotWidget::new(pos, direction, pose)
                .step(step)
                .size(sprite.size())
                .render(field, buf);

            if let Some(text) = self.map.speech_text() {
                SpeechBubble::new(text, pos).render(field, buf);
            }
        }

        self.render_border(area, buf);

        let fade = self.map.fade_opacity();
        if fade > 0.0 {
            FadeOverlay::new(fade).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::choreography::Router;
    use crate::config::VillageConfig;
    use crate::state::Route;

    struct NoRouter;

    impl Router for NoRouter {
        fn navigate(&mut self, _target: &str) {}
    }

    fn rendered(map: &MapView, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        MapWidget::new(map).render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, text: &str) -> bool {
        (0..buf.area.height).any(|y| {
            let row: String = (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect();
            row.contains(text)
        })
    }

    #[test]
    fn test_map_draws_buildings_and_mascot() {
        let map = MapView::mount(&VillageConfig::default(), &Route::default(), 120, false);
        let buf = rendered(&map, Rect::new(0, 0, 120, 40));
        assert!(contains(&buf, "Projects"));
        assert!(contains(&buf, "About"));
        assert!(contains(&buf, "Contact"));
        assert!(contains(&buf, "/|\\"));
    }

    #[test]
    fn test_mascot_hidden_before_walk_in() {
        let map = MapView::mount(&VillageConfig::default(), &Route::default(), 120, true);
        let buf = rendered(&map, Rect::new(0, 0, 120, 40));
        assert!(!contains(&buf, "(^_^)"));
    }

    #[test]
    fn test_tiny_area_is_skipped() {
        let map = MapView::mount(&VillageConfig::default(), &Route::default(), 120, false);
        rendered(&map, Rect::new(0, 0, 4, 3));
    }

    #[test]
    fn test_labels_wait_for_intro() {
        let mut map = MapView::mount(&VillageConfig::default(), &Route::default(), 120, true);
        let mut router = NoRouter;
        map.tick(Duration::from_millis(2600), &mut router);
        let buf = rendered(&map, Rect::new(0, 0, 120, 40));
        assert!(!contains(&buf, "Projects"));

        map.skip();
        let buf = rendered(&map, Rect::new(0, 0, 120, 40));
        assert!(contains(&buf, "Projects"));
    }
}
