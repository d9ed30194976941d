//! Color utility functions for glyph rendering.

use ratatui::style::{Color, Modifier};

/// Background color of the field.
pub const BACKGROUND: Color = Color::Rgb(0, 0, 0);

/// Color of a white glyph with the given opacity composited over black.
pub fn opacity_to_color(opacity: f32) -> Color {
    let v = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(v, v, v)
}

/// Text modifier approximating a font size in a fixed-size terminal cell.
///
/// Large glyphs are drawn bold and small ones dim; everything in between
/// keeps the regular weight.
pub fn font_modifier(size_px: f32) -> Modifier {
    if size_px >= 18.0 {
        Modifier::BOLD
    } else if size_px < 10.0 {
        Modifier::DIM
    } else {
        Modifier::empty()
    }
}
