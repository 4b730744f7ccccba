use crate::terminal::rgb;
use crossterm::style::Color;
use pascalart::colorize::{Border, CellStyle, Fill, PALETTE_SIZE};

/// Fibonacci diagonal colors, cycled by diagonal index
pub const FIBONACCI_PALETTE: [Color; PALETTE_SIZE] = [
    rgb(0xA3, 0xE4, 0xD7),
    rgb(0xAE, 0xD6, 0xF1),
    rgb(0xF9, 0xE7, 0x9F),
    rgb(0xF5, 0xB7, 0xB1),
    rgb(0xD7, 0xBD, 0xE2),
];

pub const DEFAULT_FILL: Color = rgb(0xFF, 0xFF, 0xFF);
pub const HIGHLIGHT: Color = rgb(0xFF, 0xF5, 0x9D);
pub const RESULT: Color = rgb(0xFF, 0x70, 0x43);
pub const MULTIPLE: Color = rgb(0xF2, 0x8B, 0x82);
pub const NOT_APPLICABLE: Color = rgb(0xE0, 0xE0, 0xE0);
pub const BLACK: Color = rgb(0x00, 0x00, 0x00);

/// Thin border gray and the accent used for the diagonal being revealed
pub const THIN_BORDER: Color = rgb(0xCC, 0xCC, 0xCC);
pub const ACCENT_BORDER: Color = rgb(0x1F, 0x61, 0x8D);

/// Text on light fills
pub const INK: Color = rgb(0x1F, 0x29, 0x37);
/// Secondary text such as row-sum labels
pub const MUTED: Color = rgb(0x6B, 0x72, 0x80);

pub fn fill_color(fill: Fill) -> Color {
    match fill {
        Fill::Default | Fill::White => DEFAULT_FILL,
        Fill::Highlight => HIGHLIGHT,
        Fill::Result => RESULT,
        Fill::Palette(idx) => FIBONACCI_PALETTE[idx % PALETTE_SIZE],
        Fill::Multiple => MULTIPLE,
        Fill::NotApplicable => NOT_APPLICABLE,
        Fill::Black => BLACK,
    }
}

/// Text color readable on top of `fill`
pub fn text_color(fill: Fill) -> Color {
    match fill {
        Fill::Black => DEFAULT_FILL,
        _ => INK,
    }
}

/// Color of the brackets drawn around a cell
pub fn border_color(style: &CellStyle) -> Color {
    match style.border {
        Border::Thin => THIN_BORDER,
        Border::Accent => ACCENT_BORDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(fill_color(Fill::Palette(6)), FIBONACCI_PALETTE[1]);
    }

    #[test]
    fn black_cells_get_light_text() {
        assert_eq!(text_color(Fill::Black), DEFAULT_FILL);
        assert_eq!(text_color(Fill::Highlight), INK);
    }

    #[test]
    fn accent_border() {
        let style = CellStyle { fill: Fill::Palette(0), border: Border::Accent };
        assert_eq!(border_color(&style), ACCENT_BORDER);
        assert_eq!(border_color(&CellStyle::default()), THIN_BORDER);
    }
}
