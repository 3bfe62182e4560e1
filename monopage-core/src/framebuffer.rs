//! In-memory page-addressed framebuffer
//!
//! The layout matches SSD1306-class controllers: the screen is cut into
//! 8-pixel-tall pages, each page holds one byte per column, and bit 0 of a
//! byte is the topmost pixel of that column in the page.

use crate::draw::{apply_masked, DrawMode};

/// 1bpp framebuffer, `WIDTH` columns by `PAGES` pages (`PAGES * 8` rows)
///
/// Flat addressing is `byte[x + page * WIDTH]`, which is exactly the order
/// the panel expects in horizontal addressing mode.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer<const WIDTH: usize, const PAGES: usize> {
    pages: [[u8; WIDTH]; PAGES],
}

/// 128x64 panel (8 pages)
pub type FrameBuffer128x64 = FrameBuffer<128, 8>;

/// 128x32 panel (4 pages)
pub type FrameBuffer128x32 = FrameBuffer<128, 4>;

impl<const WIDTH: usize, const PAGES: usize> Default for FrameBuffer<WIDTH, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: usize, const PAGES: usize> core::fmt::Debug for FrameBuffer<WIDTH, PAGES> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &WIDTH)
            .field("height", &(PAGES * 8))
            .finish_non_exhaustive()
    }
}

impl<const WIDTH: usize, const PAGES: usize> FrameBuffer<WIDTH, PAGES> {
    /// Creates a blank (all pixels off) framebuffer.
    pub const fn new() -> Self {
        Self {
            pages: [[0u8; WIDTH]; PAGES],
        }
    }

    /// Width in pixels
    #[inline]
    pub const fn width(&self) -> usize {
        WIDTH
    }

    /// Height in pixels
    #[inline]
    pub const fn height(&self) -> usize {
        PAGES * 8
    }

    /// Number of 8-pixel pages
    #[inline]
    pub const fn page_count(&self) -> usize {
        PAGES
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.fill(0x00);
    }

    /// Fills every column of every page with the same byte.
    ///
    /// `0x00` clears, `0xFF` lights everything, `0xAA` / `0x55` give
    /// horizontal stripes that alternate per row.
    pub fn fill(&mut self, pattern: u8) {
        for page in self.pages.iter_mut() {
            page.fill(pattern);
        }
    }

    /// Writes a single pixel under `mode`.
    ///
    /// Coordinates outside the screen are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, mode: DrawMode) {
        let Some((col, page, bit)) = Self::locate(x, y) else {
            return;
        };

        let byte = &mut self.pages[page][col];
        let mask = 1u8 << bit;
        match mode {
            DrawMode::Or | DrawMode::Replace | DrawMode::EraseBorder => *byte |= mask,
            DrawMode::Xor => *byte ^= mask,
            DrawMode::Erase => *byte &= !mask,
        }
    }

    /// Reads a pixel, `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (col, page, bit) = Self::locate(x, y)?;
        Some(self.pages[page][col] & (1 << bit) != 0)
    }

    /// Combines `data` into one destination byte, touching only the bits in
    /// `cover`.
    ///
    /// Columns or pages outside the screen are ignored.
    pub fn apply(&mut self, x: i32, page: i32, data: u8, cover: u8, mode: DrawMode) {
        if x < 0 || page < 0 || x as usize >= WIDTH || page as usize >= PAGES {
            return;
        }
        let byte = &mut self.pages[page as usize][x as usize];
        *byte = apply_masked(*byte, data, cover, mode);
    }

    /// Reads one byte, `None` when out of bounds.
    pub fn byte(&self, x: usize, page: usize) -> Option<u8> {
        self.pages.get(page).and_then(|p| p.get(x)).copied()
    }

    /// Returns one page (one byte per column).
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    /// Returns the whole buffer in panel order.
    pub fn as_bytes(&self) -> &[u8] {
        self.pages.as_flattened()
    }

    fn locate(x: i32, y: i32) -> Option<(usize, usize, u8)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= PAGES * 8 {
            return None;
        }
        Some((x, y / 8, (y % 8) as u8))
    }
}
