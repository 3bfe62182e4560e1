//! Horizontal line layout
//!
//! Text runs are rendered once into a wide off-screen strip. The compositor
//! then copies any window of that strip to the screen, which makes
//! scrolling a pure offset change.

use crate::text::{Decoder, TextLine};

/// Strip width in columns
pub const LINE_WIDTH: usize = 1024;

/// Strip height in pages
pub const LINE_PAGES: usize = 8;

/// Column-major off-screen strip holding one laid-out text line
pub struct LineBuffer {
    columns: [[u8; LINE_WIDTH]; LINE_PAGES],
    width: usize,
    pages: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("width", &self.width)
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            columns: [[0u8; LINE_WIDTH]; LINE_PAGES],
            width: 0,
            pages: 1,
        }
    }

    /// Lays out every run of `line`, `spacing` blank columns between glyphs.
    ///
    /// Glyphs that would start past the strip are dropped, but still
    /// count towards the measured width before clamping.
    pub fn rebuild(&mut self, line: &TextLine<'_>, spacing: u8) {
        self.pages = line
            .segments()
            .map(|(_, font)| font.pages_per_char() as usize)
            .max()
            .unwrap_or(1)
            .clamp(1, LINE_PAGES);

        for page in self.columns.iter_mut() {
            page.fill(0);
        }

        let spacing = spacing as usize;
        let mut offset = 0usize;
        for (bytes, font) in line.segments() {
            for code in Decoder::new(bytes) {
                let Some(glyph) = font.glyph_for(code) else {
                    continue;
                };

                if offset < LINE_WIDTH {
                    let pages = (glyph.pages() as usize).min(LINE_PAGES);
                    let visible = (glyph.width as usize).min(LINE_WIDTH - offset);
                    for col in 0..visible {
                        for page in 0..pages {
                            self.columns[page][offset + col] = glyph.byte(col as u8, page as u8);
                        }
                    }
                }
                offset += glyph.width as usize + spacing;
            }
        }

        self.width = offset.saturating_sub(spacing).min(LINE_WIDTH);
    }

    /// Measured line width in columns
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pages in use (tallest font on the line)
    #[inline]
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Byte at `(x, page)`, zero outside the strip
    #[inline]
    pub fn column(&self, x: usize, page: usize) -> u8 {
        self.columns
            .get(page)
            .and_then(|p| p.get(x))
            .copied()
            .unwrap_or(0)
    }
}
