//! Test fonts built at runtime

use std::vec::Vec;

use crate::font::{low_bits, Glyph, GlyphSource};

/// Font where every printable character is the same glyph and `' '` is blank
pub struct BlockFont {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
    blank: Vec<u8>,
}

impl BlockFont {
    /// Every column holds `column` (bit `n` = row `n`)
    pub fn with_column(width: u8, height: u8, column: u64) -> Self {
        let pages = height.div_ceil(8) as usize;
        let column = column & low_bits(height as u32);
        let mut pixels = Vec::with_capacity(pages * width as usize);
        for page in 0..pages {
            for _ in 0..width {
                pixels.push((column >> (page * 8)) as u8);
            }
        }
        Self {
            width,
            height,
            blank: std::vec![0; pixels.len()],
            pixels,
        }
    }

    /// Fully lit glyph
    pub fn solid(width: u8, height: u8) -> Self {
        Self::with_column(width, height, u64::MAX)
    }
}

impl GlyphSource for BlockFont {
    fn height(&self) -> u8 {
        self.height
    }

    fn lookup(&self, code: u8) -> Option<u16> {
        match code {
            b' ' => Some(1),
            0x21..=0x7E => Some(0),
            _ => None,
        }
    }

    fn glyph(&self, index: u16) -> Option<Glyph<'_>> {
        let pixels = match index {
            0 => &self.pixels,
            1 => &self.blank,
            _ => return None,
        };
        Some(Glyph {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}
