//! Map colour themes.
//!
//! Each theme is a colour filter over the static map image. The live preview
//! expresses it as a CSS filter string; snapshots apply the equivalent filter
//! to pixels.

use image::RgbaImage;
use palette::{Hsl, IntoColor, RgbHue, Srgb};

use crate::types::Theme;

/// How a theme transforms pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    Identity,
    Invert,
    /// Sepia, then rotate hue by `degrees`, then scale saturation.
    Tint { degrees: f32, saturate: f32 },
}

/// Filter for a theme.
pub fn filter(theme: Theme) -> Filter {
    let tinted = |degrees| Filter::Tint {
        degrees,
        saturate: 2.0,
    };
    match theme {
        Theme::White => Filter::Identity,
        Theme::Black => Filter::Invert,
        Theme::Red => tinted(320.0),
        Theme::Green => tinted(80.0),
        Theme::Blue => tinted(200.0),
        Theme::Purple => tinted(280.0),
        Theme::Yellow => tinted(40.0),
    }
}

/// CSS `filter` value for the live preview.
pub fn css_filter(theme: Theme) -> String {
    match filter(theme) {
        Filter::Identity => "none".to_string(),
        Filter::Invert => "invert(1)".to_string(),
        Filter::Tint { degrees, saturate } => {
            format!("sepia(1) hue-rotate({}deg) saturate({})", degrees, saturate)
        }
    }
}

/// Apply a theme to `img` in place. Alpha is preserved.
pub fn apply(theme: Theme, img: &mut RgbaImage) {
    let filter = filter(theme);
    if filter == Filter::Identity {
        return;
    }

    for pixel in img.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let [r, g, b] = match filter {
            Filter::Identity => [r, g, b],
            Filter::Invert => [255 - r, 255 - g, 255 - b],
            Filter::Tint { degrees, saturate } => tint(sepia([r, g, b]), degrees, saturate),
        };
        pixel.0 = [r, g, b, a];
    }
}

fn sepia([r, g, b]: [u8; 3]) -> [f32; 3] {
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    [
        (0.393 * r + 0.769 * g + 0.189 * b).min(255.0) / 255.0,
        (0.349 * r + 0.686 * g + 0.168 * b).min(255.0) / 255.0,
        (0.272 * r + 0.534 * g + 0.131 * b).min(255.0) / 255.0,
    ]
}

fn tint([r, g, b]: [f32; 3], degrees: f32, saturate: f32) -> [u8; 3] {
    let rgb: Srgb<f32> = Srgb::new(r, g, b);
    let mut hsl: Hsl = rgb.into_color();

    hsl.hue = RgbHue::from_degrees(hsl.hue.into_degrees() + degrees);
    hsl.saturation = (hsl.saturation * saturate).clamp(0.0, 1.0);

    let out: Srgb<f32> = hsl.into_color();
    [
        (out.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (out.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (out.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}
