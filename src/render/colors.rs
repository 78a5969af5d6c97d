//! Colors for the village.
//!
//! The map uses a soft daylight palette; the loading screen uses the four
//! shades of the original Game Boy.

use palette::{LinSrgb, Mix, Srgb};
use ratatui::style::Color;

use crate::state::EntryDirection;

/// Grass, light and dark rows alternate
pub const GRASS: Color = Color::Rgb(126, 190, 96);
pub const GRASS_DARK: Color = Color::Rgb(104, 168, 80);

/// Dirt paths between the crossroad and the doors
pub const PATH: Color = Color::Rgb(214, 184, 132);

pub const BORDER: Color = Color::Rgb(70, 110, 60);

/// Hotspot buildings: Projects, About, Contact
pub const BUILDING_COLORS: [Color; 3] = [
    Color::Rgb(196, 98, 72),   // Brick
    Color::Rgb(90, 130, 200),  // Slate blue
    Color::Rgb(224, 176, 64),  // Straw
];

pub const ROOF: Color = Color::Rgb(120, 60, 50);

pub const LABEL: Color = Color::Rgb(40, 48, 40);

pub const MASCOT_BODY: Color = Color::Rgb(255, 244, 220);
pub const MASCOT_ACCENT: Color = Color::Rgb(240, 120, 140);

pub const BUBBLE_BG: Color = Color::Rgb(250, 250, 245);
pub const BUBBLE_TEXT: Color = Color::Rgb(30, 30, 40);

/// Warm colors for the floating motes
pub const MOTE_COLORS: [Color; 5] = [
    Color::Rgb(255, 236, 140), // Pale yellow
    Color::Rgb(255, 200, 120), // Amber
    Color::Rgb(255, 170, 190), // Pink
    Color::Rgb(190, 230, 255), // Sky
    Color::Rgb(220, 255, 200), // Mint
];

/// Page chrome for Projects/About/Contact
pub const PAGE_BG: Color = Color::Rgb(246, 240, 226);
pub const PAGE_TEXT: Color = Color::Rgb(60, 64, 72);
pub const PAGE_MUTED: Color = Color::Rgb(130, 134, 140);
pub const PAGE_ACCENT: Color = Color::Rgb(70, 140, 90);
pub const ERROR_TEXT: Color = Color::Rgb(200, 60, 60);

/// Game Boy DMG shades, darkest first
pub const GAMEBOY: [Color; 4] = [
    Color::Rgb(15, 56, 15),
    Color::Rgb(48, 98, 48),
    Color::Rgb(139, 172, 15),
    Color::Rgb(155, 188, 15),
];

/// Dim a color by a factor (0.0 = black, 1.0 = unchanged)
///
/// For non-RGB colors, returns the original color unchanged.
pub fn dim_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

/// Mix a color toward black in linear light.
///
/// `amount` 0.0 leaves the color alone, 1.0 is pure black. Mixing in linear
/// space keeps mid-fade frames from looking muddy.
pub fn fade_toward_black(color: Color, amount: f32) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let linear: LinSrgb = Srgb::new(r, g, b).into_format::<f32>().into_linear();
            let mixed = linear.mix(LinSrgb::new(0.0, 0.0, 0.0), amount);
            let out = Srgb::<f32>::from_linear(mixed).into_format::<u8>();
            Color::Rgb(out.red, out.green, out.blue)
        }
        _ if amount >= 0.5 => Color::Black,
        other => other,
    }
}

pub fn building_color(entry: EntryDirection) -> Color {
    match entry {
        EntryDirection::Left => BUILDING_COLORS[0],
        EntryDirection::Up => BUILDING_COLORS[1],
        EntryDirection::Right => BUILDING_COLORS[2],
    }
}

/// Mote color by index, wrapping around the palette
pub fn mote_color(index: usize) -> Color {
    MOTE_COLORS[index % MOTE_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_color_rgb() {
        assert_eq!(dim_color(Color::Rgb(100, 200, 50), 0.5), Color::Rgb(50, 100, 25));
        assert_eq!(dim_color(Color::Blue, 0.5), Color::Blue);
    }

    #[test]
    fn test_fade_toward_black_endpoints() {
        let color = Color::Rgb(126, 190, 96);
        assert_eq!(fade_toward_black(color, 0.0), color);
        assert_eq!(fade_toward_black(color, 1.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_fade_toward_black_darkens() {
        let Color::Rgb(r, g, b) = fade_toward_black(Color::Rgb(200, 200, 200), 0.5) else {
            panic!("expected rgb");
        };
        assert!(r < 200 && g < 200 && b < 200);
        assert!(r > 0);
    }

    #[test]
    fn test_mote_color_wraps() {
        assert_eq!(mote_color(0), mote_color(MOTE_COLORS.len()));
    }
}
