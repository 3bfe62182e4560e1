//! Bitmap fonts
//!
//! A font is an immutable blob plus an offset table. Each glyph record is a
//! width byte followed by `width * pages_per_char` bytes of column-major
//! pixel data (`page * width + column`, bit 0 = top row of the page).

/// Maximum font height in pixels (eight pages)
pub const MAX_FONT_HEIGHT: u8 = 64;

/// Mask of the `n` lowest bits, saturating at 64
#[inline]
pub const fn low_bits(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Character-code to glyph-index mapping family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontKind {
    /// Digits and a few separators, for large clock/counter faces
    Numeric,
    /// Printable ASCII plus the single-byte Cyrillic block
    Hybrid,
}

impl FontKind {
    /// Maps a decoded character code to a glyph index.
    pub const fn index_of(self, code: u8) -> Option<u16> {
        match self {
            FontKind::Numeric => match code {
                b'.' => Some(0),
                b'0'..=b'9' => Some((code - b'0') as u16 + 1),
                b':' => Some(11),
                b'-' => Some(12),
                b' ' => Some(13),
                _ => None,
            },
            FontKind::Hybrid => match code {
                0x20..=0x7E => Some((code - 0x20) as u16),
                0xC0..=0xFF => Some((code - 0xC0) as u16 + 95),
                0xA8 => Some(159),
                0xB8 => Some(160),
                _ => None,
            },
        }
    }
}

/// One glyph's pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Width in columns
    pub width: u8,
    /// Height in pixels (the font height)
    pub height: u8,
    /// `width * pages` bytes, page-major then column
    pub pixels: &'a [u8],
}

impl<'a> Glyph<'a> {
    /// Number of 8-row pages the glyph spans
    #[inline]
    pub const fn pages(&self) -> u8 {
        self.height.div_ceil(8)
    }

    /// Byte at `(column, page)`, zero when out of range
    #[inline]
    pub fn byte(&self, column: u8, page: u8) -> u8 {
        let idx = page as usize * self.width as usize + column as usize;
        if column >= self.width {
            return 0;
        }
        self.pixels.get(idx).copied().unwrap_or(0)
    }

    /// Whole column as one integer, bit `n` = row `n`.
    pub fn column(&self, column: u8) -> u64 {
        (0..self.pages()).fold(0u64, |acc, page| {
            acc | (self.byte(column, page) as u64) << (page as u32 * 8)
        })
    }

    /// Union of every column, limited to the glyph height.
    ///
    /// Bit `n` is set when any pixel in row `n` is lit.
    pub fn row_mask(&self) -> u64 {
        let rows = (0..self.width).fold(0u64, |acc, col| acc | self.column(col));
        rows & low_bits(self.height as u32)
    }
}

/// Read-only glyph lookup
///
/// The layout engines only ever see fonts through this trait, so callers
/// can back glyphs with flash tables, generated data or test fixtures.
pub trait GlyphSource {
    /// Height in pixels
    fn height(&self) -> u8;

    /// Character code to glyph index, `None` if the font lacks the glyph
    fn lookup(&self, code: u8) -> Option<u16>;

    /// Glyph by index, `None` if the index or its data is out of range
    fn glyph(&self, index: u16) -> Option<Glyph<'_>>;

    /// Pages needed to hold one row of text
    fn pages_per_char(&self) -> u8 {
        self.height().div_ceil(8)
    }

    /// Lookup and fetch in one step
    fn glyph_for(&self, code: u8) -> Option<Glyph<'_>> {
        self.lookup(code).and_then(|index| self.glyph(index))
    }
}

/// Font stored as a data blob plus offset table
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    data: &'a [u8],
    offsets: &'a [u16],
    height: u8,
    kind: FontKind,
}

impl<'a> Font<'a> {
    /// Wraps font tables. Heights above [`MAX_FONT_HEIGHT`] are clamped.
    pub const fn new(data: &'a [u8], offsets: &'a [u16], height: u8, kind: FontKind) -> Self {
        let height = if height > MAX_FONT_HEIGHT {
            MAX_FONT_HEIGHT
        } else {
            height
        };
        Self {
            data,
            offsets,
            height,
            kind,
        }
    }

    /// Mapping family
    pub const fn kind(&self) -> FontKind {
        self.kind
    }

    /// Number of glyph records
    pub const fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the font has no glyphs
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl GlyphSource for Font<'_> {
    fn height(&self) -> u8 {
        self.height
    }

    fn lookup(&self, code: u8) -> Option<u16> {
        self.kind.index_of(code)
    }

    fn glyph(&self, index: u16) -> Option<Glyph<'_>> {
        let start = *self.offsets.get(index as usize)? as usize;
        let width = *self.data.get(start)?;
        let len = width as usize * self.pages_per_char() as usize;
        let pixels = self.data.get(start + 1..start + 1 + len)?;
        Some(Glyph {
            width,
            height: self.height,
            pixels,
        })
    }
}
