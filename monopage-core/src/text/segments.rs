//! Text line storage
//!
//! A line is a list of (text, font) runs sharing one fixed text buffer.
//! Appends either fit completely or are rejected without touching the
//! existing runs.

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::font::GlyphSource;

/// Maximum number of runs per line
pub const MAX_SEGMENTS: usize = 8;

/// Shared text buffer capacity in bytes
pub const TEXT_CAPACITY: usize = 256;

/// Scratch size for one formatted number
const NUMBER_CAPACITY: usize = 64;

/// Text append errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// All segment slots are in use
    SegmentsFull,
    /// Text buffer would overflow
    BufferFull,
    /// Number did not fit the formatting scratch
    Format,
}

/// One run of text drawn with one font
#[derive(Clone, Copy)]
pub struct Segment<'f> {
    start: u16,
    len: u16,
    font: &'f dyn GlyphSource,
}

impl<'f> Segment<'f> {
    /// Font used for this run
    pub fn font(&self) -> &'f dyn GlyphSource {
        self.font
    }
}

impl core::fmt::Debug for Segment<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Segment")
            .field("start", &self.start)
            .field("len", &self.len)
            .field("font_height", &self.font.height())
            .finish()
    }
}

/// Text runs of the current line plus a dirty flag for the layout cache
#[derive(Debug)]
pub struct TextLine<'f> {
    text: String<TEXT_CAPACITY>,
    segments: Vec<Segment<'f>, MAX_SEGMENTS>,
    dirty: bool,
}

impl Default for TextLine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'f> TextLine<'f> {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            segments: Vec::new(),
            dirty: true,
        }
    }

    /// Drops every run and invalidates the layout.
    pub fn clear(&mut self) {
        self.text.clear();
        self.segments.clear();
        self.dirty = true;
    }

    /// Appends a run of text in `font`.
    ///
    /// Empty text is accepted and adds nothing.
    pub fn push_str(&mut self, text: &str, font: &'f dyn GlyphSource) -> Result<(), TextError> {
        if text.is_empty() {
            return Ok(());
        }
        let result = self.try_push(text, font);
        #[cfg(feature = "defmt")]
        if let Err(e) = result {
            defmt::debug!("text append rejected: {}", e);
        }
        result
    }

    fn try_push(&mut self, text: &str, font: &'f dyn GlyphSource) -> Result<(), TextError> {
        if self.segments.is_full() {
            return Err(TextError::SegmentsFull);
        }
        if text.len() > TEXT_CAPACITY - self.text.len() {
            return Err(TextError::BufferFull);
        }

        let start = self.text.len() as u16;
        self.text
            .push_str(text)
            .map_err(|_| TextError::BufferFull)?;
        self.segments
            .push(Segment {
                start,
                len: text.len() as u16,
                font,
            })
            .map_err(|_| TextError::SegmentsFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Appends a signed integer, zero-padded to `width` characters.
    pub fn push_int(
        &mut self,
        value: i64,
        width: usize,
        font: &'f dyn GlyphSource,
    ) -> Result<(), TextError> {
        let mut buf: String<NUMBER_CAPACITY> = String::new();
        write!(buf, "{value:0width$}").map_err(|_| TextError::Format)?;
        self.push_str(&buf, font)
    }

    /// Appends an unsigned integer, zero-padded to `width` characters.
    pub fn push_uint(
        &mut self,
        value: u64,
        width: usize,
        font: &'f dyn GlyphSource,
    ) -> Result<(), TextError> {
        let mut buf: String<NUMBER_CAPACITY> = String::new();
        write!(buf, "{value:0width$}").map_err(|_| TextError::Format)?;
        self.push_str(&buf, font)
    }

    /// Appends a float with `decimals` fractional digits, zero-padded to
    /// `width` characters.
    pub fn push_float(
        &mut self,
        value: f32,
        decimals: usize,
        width: usize,
        font: &'f dyn GlyphSource,
    ) -> Result<(), TextError> {
        let mut buf: String<NUMBER_CAPACITY> = String::new();
        write!(buf, "{value:0width$.decimals$}").map_err(|_| TextError::Format)?;
        self.push_str(&buf, font)
    }

    /// Runs as `(bytes, font)` pairs in append order
    pub fn segments<'s>(&'s self) -> impl Iterator<Item = (&'s [u8], &'f dyn GlyphSource)> + 's {
        let bytes = self.text.as_bytes();
        self.segments.iter().map(move |s| {
            let start = s.start as usize;
            (&bytes[start..start + s.len as usize], s.font)
        })
    }

    /// Number of runs
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Bytes used in the shared buffer
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Height of the tallest font on the line, 0 when empty
    pub fn max_height(&self) -> u8 {
        self.segments
            .iter()
            .map(|s| s.font.height())
            .max()
            .unwrap_or(0)
    }

    /// Whether the layout cache is stale
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the layout cache as matching the current runs.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Forces the next render to rebuild the layout.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Glyph;

    struct Fixed(u8);

    impl GlyphSource for Fixed {
        fn height(&self) -> u8 {
            self.0
        }
        fn lookup(&self, _code: u8) -> Option<u16> {
            None
        }
        fn glyph(&self, _index: u16) -> Option<Glyph<'_>> {
            None
        }
    }

    fn collect(line: &TextLine<'_>) -> Vec<(std::string::String, u8), MAX_SEGMENTS> {
        line.segments()
            .map(|(b, f)| (std::string::String::from_utf8(b.to_vec()).unwrap(), f.height()))
            .collect()
    }

    #[test]
    fn test_runs_keep_order_and_font() {
        let small = Fixed(8);
        let big = Fixed(24);
        let mut line = TextLine::new();

        line.push_str("Temp ", &small).unwrap();
        line.push_str("21", &big).unwrap();

        let runs = collect(&line);
        assert_eq!(runs[0], ("Temp ".into(), 8));
        assert_eq!(runs[1], ("21".into(), 24));
        assert_eq!(line.max_height(), 24);
        assert!(line.is_dirty());
    }

    #[test]
    fn test_overflow_by_one_byte_is_rejected() {
        let font = Fixed(8);
        let mut line = TextLine::new();
        let filler = "x".repeat(TEXT_CAPACITY - 4);

        line.push_str(&filler, &font).unwrap();
        line.push_str("abc", &font).unwrap();
        line.mark_clean();

        assert_eq!(line.push_str("de", &font), Err(TextError::BufferFull));
        assert_eq!(line.segment_count(), 2);
        assert_eq!(line.len(), TEXT_CAPACITY - 1);
        assert!(!line.is_dirty());

        // Exactly filling the buffer still fits
        line.push_str("d", &font).unwrap();
        assert_eq!(line.len(), TEXT_CAPACITY);
    }

    #[test]
    fn test_segment_limit() {
        let font = Fixed(8);
        let mut line = TextLine::new();
        for _ in 0..MAX_SEGMENTS {
            line.push_str("a", &font).unwrap();
        }
        assert_eq!(line.push_str("b", &font), Err(TextError::SegmentsFull));
        assert_eq!(line.len(), MAX_SEGMENTS);
    }

    #[test]
    fn test_number_formatting() {
        let font = Fixed(8);
        let mut line = TextLine::new();

        line.push_int(-42, 5, &font).unwrap();
        line.push_uint(7, 3, &font).unwrap();
        line.push_float(3.14159, 2, 6, &font).unwrap();
        line.push_int(12345, 0, &font).unwrap();

        let runs = collect(&line);
        assert_eq!(runs[0].0, "-0042");
        assert_eq!(runs[1].0, "007");
        assert_eq!(runs[2].0, "003.14");
        assert_eq!(runs[3].0, "12345");
    }

    #[test]
    fn test_oversized_number_width_is_format_error() {
        let font = Fixed(8);
        let mut line = TextLine::new();
        assert_eq!(line.push_uint(1, 100, &font), Err(TextError::Format));
        assert!(line.is_empty());
    }

    #[test]
    fn test_clear_resets_and_dirties() {
        let font = Fixed(8);
        let mut line = TextLine::new();
        line.push_str("abc", &font).unwrap();
        line.mark_clean();

        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
        assert!(line.is_dirty());
        assert_eq!(line.max_height(), 0);
    }
}
