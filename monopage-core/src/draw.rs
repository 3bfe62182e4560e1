//! Draw modes
//!
//! A draw mode decides how new pixels combine with what is already in the
//! framebuffer. Primitives go through the single-bit write in
//! [`FrameBuffer::set_pixel`](crate::FrameBuffer::set_pixel); both text
//! compositors and the framebuffer's byte write go through [`apply_masked`].

use serde::{Deserialize, Serialize};

/// Pixel combination rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawMode {
    /// Overlay: lit pixels are OR-ed onto the background
    Or,
    /// Auto-invert: lit pixels toggle the background
    Xor,
    /// Masked replace: inside the cover mask new bits win and zeros erase
    #[default]
    Replace,
    /// Eraser: lit pixels force the destination off
    Erase,
    /// Filled shapes erase their interior, then draw their outline with `Or`.
    /// Single pixels behave like `Or`.
    EraseBorder,
}

impl DrawMode {
    /// Whether an all-zero source byte can be skipped without changing
    /// the destination.
    ///
    /// Only `Replace` uses zero bits to erase background.
    #[inline]
    pub const fn skips_blank(self) -> bool {
        !matches!(self, DrawMode::Replace)
    }
}

/// Combine one destination byte with new data inside `cover`
///
/// Bits outside `cover` are never touched, whatever the mode.
#[inline]
pub const fn apply_masked(old: u8, new: u8, cover: u8, mode: DrawMode) -> u8 {
    let bits = new & cover;
    match mode {
        DrawMode::Replace => (old & !cover) | bits,
        DrawMode::Or | DrawMode::EraseBorder => old | bits,
        DrawMode::Xor => old ^ bits,
        DrawMode::Erase => old & !bits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MODES: [DrawMode; 5] = [
        DrawMode::Or,
        DrawMode::Xor,
        DrawMode::Replace,
        DrawMode::Erase,
        DrawMode::EraseBorder,
    ];

    #[test]
    fn test_replace_erases_inside_cover_only() {
        // Cover is the lower nibble: upper nibble must survive untouched
        assert_eq!(
            apply_masked(0b1111_1111, 0b0000_0101, 0x0F, DrawMode::Replace),
            0b1111_0101
        );
    }

    #[test]
    fn test_or_and_xor() {
        assert_eq!(apply_masked(0b1000_0001, 0b0000_0011, 0xFF, DrawMode::Or), 0b1000_0011);
        assert_eq!(apply_masked(0b1000_0001, 0b0000_0011, 0xFF, DrawMode::Xor), 0b1000_0010);
    }

    #[test]
    fn test_erase_clears_lit_bits() {
        assert_eq!(apply_masked(0xFF, 0b0011_0000, 0xFF, DrawMode::Erase), 0b1100_1111);
    }

    #[test]
    fn test_erase_border_overlays() {
        assert_eq!(apply_masked(0x01, 0x80, 0xFF, DrawMode::EraseBorder), 0x81);
    }

    #[test]
    fn test_only_replace_keeps_blank_bytes() {
        assert!(!DrawMode::Replace.skips_blank());
        assert!(DrawMode::Or.skips_blank());
        assert!(DrawMode::Xor.skips_blank());
    }

    #[test]
    fn test_default_mode_is_replace() {
        assert_eq!(DrawMode::default(), DrawMode::Replace);
    }

    proptest! {
        #[test]
        fn prop_bits_outside_cover_untouched(old: u8, new: u8, cover: u8, idx in 0usize..5) {
            let out = apply_masked(old, new, cover, MODES[idx]);
            prop_assert_eq!(out & !cover, old & !cover);
        }

        #[test]
        fn prop_replace_is_idempotent(old: u8, new: u8, cover: u8) {
            let once = apply_masked(old, new, cover, DrawMode::Replace);
            let twice = apply_masked(once, new, cover, DrawMode::Replace);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_xor_is_self_inverse(old: u8, new: u8, cover: u8) {
            let once = apply_masked(old, new, cover, DrawMode::Xor);
            prop_assert_eq!(apply_masked(once, new, cover, DrawMode::Xor), old);
        }

        #[test]
        fn prop_blank_source_is_noop_when_skippable(old: u8, cover: u8, idx in 0usize..5) {
            let mode = MODES[idx];
            if mode.skips_blank() {
                prop_assert_eq!(apply_masked(old, 0, cover, mode), old);
            }
        }
    }
}
