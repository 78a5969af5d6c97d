use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::animation::loading::TOTAL_BLOCKS;
use crate::animation::LoadingProgress;

use super::colors::{fade_toward_black, GAMEBOY};
use super::{draw_box, draw_centered, fill};

/// Darkens whatever is already in the buffer.
///
/// At full opacity every cell is black, which hides the page while the
/// router swaps views underneath.
pub struct FadeOverlay {
    opacity: f32,
}

impl FadeOverlay {
    pub fn new(opacity: f32) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

impl Widget for FadeOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity <= 0.0 {
            return;
        }
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &mut buf[(x, y)];
                if self.opacity >= 1.0 {
                    cell.set_char(' ');
                }
                let fg = fade_toward_black(cell.fg, self.opacity);
                let bg = fade_toward_black(cell.bg, self.opacity);
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// Startup screen in Game Boy green
pub struct LoadingScreen<'a> {
    progress: &'a LoadingProgress,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(progress: &'a LoadingProgress) -> Self {
        Self { progress }
    }
}

impl Widget for LoadingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        fill(buf, area, Style::default().bg(GAMEBOY[0]));

        let bar_width = TOTAL_BLOCKS as u16 + 4;
        let box_width = bar_width + 8;
        let box_height = 8u16;
        if area.width < box_width || area.height < box_height {
            draw_centered(
                buf,
                area,
                area.y + area.height / 2,
                &format!("{}%", self.progress.percent()),
                Style::default().fg(GAMEBOY[3]).bg(GAMEBOY[0]),
            );
            return;
        }

        let screen = Rect::new(
            area.x + (area.width - box_width) / 2,
            area.y + (area.height - box_height) / 2,
            box_width,
            box_height,
        );
        fill(buf, screen, Style::default().bg(GAMEBOY[3]));
        draw_box(buf, screen, Style::default().fg(GAMEBOY[1]).bg(GAMEBOY[3]));

        let text = Style::default().fg(GAMEBOY[0]).bg(GAMEBOY[3]);
        draw_centered(buf, screen, screen.y + 2, "LOADING...", text.add_modifier(Modifier::BOLD));

        // [████████░░░░░░░░]
        let bar_y = screen.y + 4;
        let bar_x = screen.x + (box_width - bar_width) / 2;
        buf[(bar_x, bar_y)].set_char('[').set_style(text);
        let filled = self.progress.filled_blocks();
        for i in 0..TOTAL_BLOCKS {
            let (ch, color) = if i < filled {
                ('█', GAMEBOY[1])
            } else {
                ('░', GAMEBOY[2])
            };
            buf[(bar_x + 2 + i as u16, bar_y)]
                .set_char(ch)
                .set_style(Style::default().fg(color).bg(GAMEBOY[3]));
        }
        buf[(bar_x + bar_width - 1, bar_y)].set_char(']').set_style(text);

        draw_centered(buf, screen, screen.y + 6, &format!("{}%", self.progress.percent()), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use std::time::Duration;

    #[test]
    fn test_full_fade_blacks_out() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        buf[(1, 1)]
            .set_char('x')
            .set_style(Style::default().fg(Color::Rgb(200, 100, 50)).bg(Color::Rgb(10, 20, 30)));

        FadeOverlay::new(1.0).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].symbol(), " ");
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_partial_fade_keeps_content() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        buf[(0, 0)].set_char('x').set_fg(Color::Rgb(200, 200, 200));
        FadeOverlay::new(0.3).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "x");
        assert_ne!(buf[(0, 0)].fg, Color::Rgb(200, 200, 200));
    }

    #[test]
    fn test_loading_screen_shows_progress() {
        let mut progress = LoadingProgress::new(Duration::from_millis(1000));
        progress.tick(Duration::from_millis(500));

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        LoadingScreen::new(&progress).render(area, &mut buf);

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect();
        assert!(rows.iter().any(|r| r.contains("LOADING...")));
        assert!(rows.iter().any(|r| r.contains("50%")));
        assert!(rows.iter().any(|r| r.matches('█').count() == 8));
    }
}
