//! Vertical (stacked) text layout
//!
//! Glyphs are stacked top to bottom. Each glyph is cropped to the rows it
//! actually uses, so a column of digits packs tightly whatever the font's
//! built-in padding.

use heapless::Vec;

use crate::font::{low_bits, Glyph};
use crate::text::{Decoder, TextLine};

/// Glyphs measured per line; the rest of the line is ignored
pub const MAX_VERTICAL_GLYPHS: usize = 128;

/// One measured glyph of a vertical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedGlyph<'f> {
    /// Pixels, `None` for a blank glyph (drawn as a gap)
    pub glyph: Option<Glyph<'f>>,
    /// Empty rows cropped from the top
    pub skip_top: u8,
    /// Rows kept after cropping both ends
    pub real_height: u8,
}

impl StackedGlyph<'_> {
    /// Cropped column `col`, bit 0 = first kept row
    pub fn cropped_column(&self, col: u8) -> u64 {
        match self.glyph {
            Some(g) => (g.column(col) >> self.skip_top) & low_bits(self.real_height as u32),
            None => 0,
        }
    }

    /// Glyph width, zero for blanks
    pub fn width(&self) -> u8 {
        self.glyph.map_or(0, |g| g.width)
    }
}

/// Gap height used for a blank glyph of a `height`-pixel font
pub const fn blank_height(height: u8) -> u8 {
    if height > 4 {
        height / 3
    } else {
        4
    }
}

/// Measured vertical line
#[derive(Debug, Default)]
pub struct VerticalLayout<'f> {
    glyphs: Vec<StackedGlyph<'f>, MAX_VERTICAL_GLYPHS>,
    total_height: i32,
}

impl<'f> VerticalLayout<'f> {
    /// Empty layout
    pub const fn new() -> Self {
        Self {
            glyphs: Vec::new(),
            total_height: 0,
        }
    }

    /// Measures every glyph of `line` with `spacing` rows between glyphs.
    pub fn measure(line: &TextLine<'f>, spacing: u8) -> Self {
        let mut glyphs = Vec::new();

        'runs: for (bytes, font) in line.segments() {
            for code in Decoder::new(bytes) {
                let Some(glyph) = font.glyph_for(code) else {
                    continue;
                };
                let height = glyph.height;
                let rows = glyph.row_mask();

                let stacked = if rows == 0 {
                    StackedGlyph {
                        glyph: None,
                        skip_top: height,
                        real_height: blank_height(height),
                    }
                } else {
                    let skip_top = rows.trailing_zeros() as u8;
                    let last_row = 63 - rows.leading_zeros() as u8;
                    StackedGlyph {
                        glyph: Some(glyph),
                        skip_top,
                        real_height: last_row - skip_top + 1,
                    }
                };

                if glyphs.push(stacked).is_err() {
                    break 'runs;
                }
            }
        }

        let spacing = spacing as i32;
        let total_height = glyphs
            .iter()
            .map(|g| g.real_height as i32 + spacing)
            .sum::<i32>()
            - if glyphs.is_empty() { 0 } else { spacing };

        Self {
            glyphs,
            total_height,
        }
    }

    /// Measured glyphs in order
    pub fn glyphs(&self) -> &[StackedGlyph<'f>] {
        &self.glyphs
    }

    /// Stack height including spacing, zero when empty
    pub fn total_height(&self) -> i32 {
        self.total_height
    }

    /// Widest glyph in columns
    pub fn width(&self) -> u8 {
        self.glyphs.iter().map(|g| g.width()).max().unwrap_or(0)
    }
}
