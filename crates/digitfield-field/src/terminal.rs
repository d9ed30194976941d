//! Terminal drawing surface backed by a ratatui buffer.

use digitfield_core::CellMetrics;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::chars::DIGIT_CHARS;
use crate::color::{BACKGROUND, font_modifier, opacity_to_color};
use crate::render::Surface;
use crate::state::Viewport;

/// Viewport in virtual pixels covered by a terminal area.
pub fn viewport_for(area: Rect, cell: CellMetrics) -> Viewport {
    Viewport {
        width: f32::from(area.width) * f32::from(cell.width_px),
        height: f32::from(area.height) * f32::from(cell.height_px),
    }
}

/// Virtual-pixel position of the center of a terminal cell.
pub fn cell_center(column: u16, row: u16, cell: CellMetrics) -> (f32, f32) {
    (
        (f32::from(column) + 0.5) * f32::from(cell.width_px),
        (f32::from(row) + 0.5) * f32::from(cell.height_px),
    )
}

/// [`Surface`] drawing into a ratatui [`Buffer`].
///
/// Each glyph lands in the terminal cell containing its center. Later glyphs
/// overwrite earlier ones in the same cell.
#[derive(Debug)]
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell: CellMetrics,
    font_px: f32,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cell: CellMetrics) -> Self {
        Self {
            buf,
            area,
            cell,
            font_px: 0.0,
        }
    }

    /// Terminal position of the cell containing a virtual-pixel point.
    fn cell_at(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let column = (x / f32::from(self.cell.width_px)) as u16;
        let row = (y / f32::from(self.cell.height_px)) as u16;
        if column >= self.area.width || row >= self.area.height {
            return None;
        }
        Some((self.area.x + column, self.area.y + row))
    }
}

impl Surface for BufferSurface<'_> {
    fn fill_black(&mut self) {
        let style = Style::new().bg(BACKGROUND);
        for position in self.area.positions() {
            self.buf[position].reset();
            self.buf[position].set_style(style);
        }
    }

    fn set_font(&mut self, size_px: f32) {
        self.font_px = size_px;
    }

    fn draw_digit(&mut self, x: f32, y: f32, digit: u8, opacity: f32) {
        let Some(&ch) = DIGIT_CHARS.get(digit as usize) else {
            return;
        };
        let Some(position) = self.cell_at(x, y) else {
            return;
        };
        let style = Style::new()
            .fg(opacity_to_color(opacity))
            .bg(BACKGROUND)
            .add_modifier(font_modifier(self.font_px));

        let cell = &mut self.buf[position];
        cell.reset();
        cell.set_char(ch).set_style(style);
    }
}
