//! Byte stream to character codes
//!
//! Text arrives as ASCII mixed with two-byte Cyrillic sequences. Every
//! character is reduced to a single-byte code in the fonts' extended range.

/// Replacement for sequences with no single-byte code
pub const REPLACEMENT: u8 = b'?';

/// Decodes the character at the start of `bytes`.
///
/// Returns the code and the number of bytes consumed, `None` on empty input.
pub fn decode(bytes: &[u8]) -> Option<(u8, usize)> {
    let &lead = bytes.first()?;
    if lead < 0x80 {
        return Some((lead, 1));
    }
    let Some(&trail) = bytes.get(1) else {
        return Some((REPLACEMENT, 1));
    };

    let code = match (lead, trail) {
        (0xD0, 0x81) => 0xA8,
        (0xD0, 0x90..=0xBF) => trail + 0x30,
        (0xD1, 0x91) => 0xB8,
        (0xD1, 0x80..=0x8F) => trail + 0x70,
        _ => REPLACEMENT,
    };
    Some((code, 2))
}

/// Iterator over the character codes of a byte slice
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl Iterator for Decoder<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let (code, used) = decode(self.bytes)?;
        self.bytes = &self.bytes[used..];
        Some(code)
    }
}
