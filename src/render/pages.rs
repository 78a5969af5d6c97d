use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::pages::content::{ABOUT_HEADING, ABOUT_PARAGRAPHS, PROJECTS, SKILLS};
use crate::pages::{ContactField, ContactPage, SubmitStatus};
use crate::state::{EntryDirection, Page};

use super::colors::{
    building_color, ERROR_TEXT, PAGE_ACCENT, PAGE_BG, PAGE_MUTED, PAGE_TEXT,
};
use super::{draw_box, draw_centered, draw_text, fill, wrap};

/// Columns reserved on each side for the edge arrows
const SIDE_MARGIN: u16 = 12;
/// Rows reserved at the top for the up arrow
const TOP_MARGIN: u16 = 3;

/// Area left for page content once the edge arrows have their room
pub fn content_area(area: Rect) -> Rect {
    Rect::new(
        area.x + SIDE_MARGIN,
        area.y + TOP_MARGIN,
        area.width.saturating_sub(SIDE_MARGIN * 2),
        area.height.saturating_sub(TOP_MARGIN + 1),
    )
}

/// Edge arrow lane under a cell, if any
pub fn edge_at(area: Rect, x: u16, y: u16) -> Option<EntryDirection> {
    if x < area.x || x >= area.right() || y < area.y || y >= area.bottom() {
        return None;
    }
    if x < area.x + SIDE_MARGIN {
        Some(EntryDirection::Left)
    } else if x >= area.right().saturating_sub(SIDE_MARGIN) {
        Some(EntryDirection::Right)
    } else if y < area.y + TOP_MARGIN {
        Some(EntryDirection::Up)
    } else {
        None
    }
}

fn text_style() -> Style {
    Style::default().fg(PAGE_TEXT).bg(PAGE_BG)
}

fn heading(buf: &mut Buffer, area: Rect, y: u16, title: &str) {
    let style = Style::default()
        .fg(PAGE_ACCENT)
        .bg(PAGE_BG)
        .add_modifier(Modifier::BOLD);
    draw_centered(buf, area, y, title, style);
}

/// Project cards, one under the other
pub struct ProjectsWidget;

impl Widget for ProjectsWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        fill(buf, area, Style::default().bg(PAGE_BG));
        let body = content_area(area);
        if body.width < 10 || body.height < 3 {
            return;
        }
        heading(buf, body, body.y, Page::Projects.title());

        let tech_style = Style::default()
            .fg(building_color(EntryDirection::Left))
            .bg(PAGE_BG);
        let title_style = text_style().add_modifier(Modifier::BOLD);

        let mut y = body.y + 2;
        for project in PROJECTS {
            if y >= body.bottom() {
                break;
            }
            draw_text(buf, body, body.x, y, &format!("▸ {}", project.title), title_style);
            y += 1;
            for line in wrap(project.description, body.width.saturating_sub(2) as usize) {
                draw_text(buf, body, body.x + 2, y, &line, text_style());
                y += 1;
            }
            let tags = project
                .technologies
                .iter()
                .map(|t| format!("[{}]", t))
                .collect::<Vec<_>>()
                .join(" ");
            draw_text(buf, body, body.x + 2, y, &tags, tech_style);
            y += 2;
        }
    }
}

/// Bio paragraphs and skill bars
pub struct AboutWidget;

impl Widget for AboutWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        fill(buf, area, Style::default().bg(PAGE_BG));
        let body = content_area(area);
        if body.width < 10 || body.height < 3 {
            return;
        }
        heading(buf, body, body.y, Page::About.title());

        let mut y = body.y + 2;
        draw_text(buf, body, body.x, y, ABOUT_HEADING, text_style().add_modifier(Modifier::BOLD));
        y += 2;
        for paragraph in ABOUT_PARAGRAPHS {
            for line in wrap(paragraph, body.width as usize) {
                draw_text(buf, body, body.x, y, &line, text_style());
                y += 1;
            }
            y += 1;
        }

        // Skill bars: name, then a 20-cell bar, then the percent
        let name_width = SKILLS.iter().map(|s| s.name.len()).max().unwrap_or(0) as u16 + 2;
        let bar_width = 20u16;
        for skill in SKILLS {
            if y >= body.bottom() {
                break;
            }
            let x = draw_text(buf, body, body.x, y, skill.name, text_style());
            let bar_x = x.max(body.x + name_width);
            let filled = (skill.level as u16 * bar_width + 50) / 100;
            for i in 0..bar_width {
                let (ch, color) = if i < filled { ('█', PAGE_ACCENT) } else { ('░', PAGE_MUTED) };
                draw_text(
                    buf,
                    body,
                    bar_x + i,
                    y,
                    &ch.to_string(),
                    Style::default().fg(color).bg(PAGE_BG),
                );
            }
            draw_text(
                buf,
                body,
                bar_x + bar_width + 1,
                y,
                &format!("{}%", skill.level),
                Style::default().fg(PAGE_MUTED).bg(PAGE_BG),
            );
            y += 1;
        }
    }
}

/// The contact form
pub struct ContactWidget<'a> {
    page: &'a ContactPage,
}

impl<'a> ContactWidget<'a> {
    pub fn new(page: &'a ContactPage) -> Self {
        Self { page }
    }
}

impl Widget for ContactWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        fill(buf, area, Style::default().bg(PAGE_BG));
        let body = content_area(area);
        if body.width < 16 || body.height < 12 {
            return;
        }
        heading(buf, body, body.y, Page::Contact.title());

        let muted = Style::default().fg(PAGE_MUTED).bg(PAGE_BG);
        let mut y = body.y + 2;
        draw_text(buf, body, body.x, y, "Have a question or want to work together?", muted);
        y += 2;

        let field_width = body.width.min(60);
        for field in ContactField::ALL {
            let focused = self.page.focus() == Some(field);
            let rows = if field == ContactField::Message { 4 } else { 1 };
            let label_style = if focused {
                Style::default().fg(PAGE_ACCENT).bg(PAGE_BG).add_modifier(Modifier::BOLD)
            } else {
                text_style()
            };
            draw_text(buf, body, body.x, y, field.label(), label_style);
            y += 1;

            let input = Rect::new(body.x, y, field_width, rows + 2).intersection(body);
            let border = if focused { PAGE_ACCENT } else { PAGE_MUTED };
            draw_box(buf, input, Style::default().fg(border).bg(PAGE_BG));

            let inner_width = field_width.saturating_sub(4) as usize;
            let mut lines = wrap(self.page.form.field(field), inner_width.max(1));
            if lines.len() > rows as usize {
                lines.drain(..lines.len() - rows as usize);
            }
            for (i, line) in lines.iter().enumerate() {
                draw_text(buf, input, input.x + 2, input.y + 1 + i as u16, line, text_style());
            }
            if focused {
                let last = lines.last().map(|l| l.chars().count()).unwrap_or(0) as u16;
                let cursor_y = input.y + lines.len().max(1) as u16;
                draw_text(buf, input, input.x + 2 + last, cursor_y, "▏", label_style);
            }
            y += rows + 2;
        }

        let (status, style) = match self.page.status() {
            SubmitStatus::Idle => ("Tab: next field   Enter: send".to_string(), muted),
            SubmitStatus::Sending => ("Sending...".to_string(), muted),
            SubmitStatus::Sent(message) => (
                message.clone(),
                Style::default().fg(PAGE_ACCENT).bg(PAGE_BG).add_modifier(Modifier::BOLD),
            ),
            SubmitStatus::Failed(message) => (message.clone(), Style::default().fg(ERROR_TEXT).bg(PAGE_BG)),
        };
        draw_text(buf, body, body.x, y + 1, &status, style);
    }
}

/// Arrows at the left, top and right edges leading to each page
pub struct EdgeArrows {
    current: Page,
}

impl EdgeArrows {
    pub fn new(current: Page) -> Self {
        Self { current }
    }
}

impl Widget for EdgeArrows {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < SIDE_MARGIN * 2 + 4 || area.height < TOP_MARGIN + 4 {
            return;
        }
        let mid_y = area.y + area.height / 2;

        for entry in EntryDirection::ALL {
            let page = Page::behind(entry);
            let here = page == self.current;
            let color = if here { PAGE_MUTED } else { building_color(entry) };
            let mut style = Style::default().fg(color).bg(PAGE_BG).add_modifier(Modifier::BOLD);
            if here {
                style = style.remove_modifier(Modifier::BOLD);
            }

            match entry {
                EntryDirection::Left => {
                    let lane = Rect::new(area.x, area.y, SIDE_MARGIN, area.height);
                    draw_centered(buf, lane, mid_y - 1, "◀", style);
                    draw_centered(buf, lane, mid_y, page.title(), style);
                    draw_centered(buf, lane, mid_y + 1, "←", style);
                }
                EntryDirection::Up => {
                    draw_centered(buf, area, area.y, "▲", style);
                    draw_centered(buf, area, area.y + 1, &format!("↑ {}", page.title()), style);
                }
                EntryDirection::Right => {
                    let lane = Rect::new(area.right() - SIDE_MARGIN, area.y, SIDE_MARGIN, area.height);
                    draw_centered(buf, lane, mid_y - 1, "▶", style);
                    draw_centered(buf, lane, mid_y, page.title(), style);
                    draw_centered(buf, lane, mid_y + 1, "→", style);
                }
            }
        }

        let hint = "Esc: back to the village";
        draw_text(
            buf,
            area,
            area.x + 1,
            area.bottom() - 1,
            hint,
            Style::default().fg(PAGE_MUTED).bg(PAGE_BG),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_projects_lists_titles() {
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        ProjectsWidget.render(area, &mut buf);
        let rows = rows(&buf);
        assert!(rows.iter().any(|r| r.contains(PROJECTS[0].title)));
    }

    #[test]
    fn test_about_draws_skill_bars() {
        let area = Rect::new(0, 0, 100, 50);
        let mut buf = Buffer::empty(area);
        AboutWidget.render(area, &mut buf);
        let rows = rows(&buf);
        assert!(rows.iter().any(|r| r.contains("JavaScript") && r.contains("90%")));
    }

    #[test]
    fn test_contact_shows_status() {
        let mut page = ContactPage::new();
        page.begin_submit();

        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        ContactWidget::new(&page).render(area, &mut buf);
        let rows = rows(&buf);
        assert!(rows.iter().any(|r| r.contains("Please tell me your name")));
    }

    #[test]
    fn test_edge_hit_lanes() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(edge_at(area, 2, 15), Some(EntryDirection::Left));
        assert_eq!(edge_at(area, 95, 15), Some(EntryDirection::Right));
        assert_eq!(edge_at(area, 50, 1), Some(EntryDirection::Up));
        assert_eq!(edge_at(area, 50, 15), None);
        assert_eq!(edge_at(area, 150, 15), None);
    }

    #[test]
    fn test_edge_arrows_label_every_page() {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        EdgeArrows::new(Page::About).render(area, &mut buf);
        let rows = rows(&buf);
        for page in [Page::Projects, Page::About, Page::Contact] {
            assert!(rows.iter().any(|r| r.contains(page.title())), "{}", page.title());
        }
    }
}
