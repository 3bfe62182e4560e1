//! Text compositing
//!
//! Copies laid-out text into the framebuffer at the cursor. Text rarely
//! starts on a page boundary, so each source byte is split over two
//! destination pages and written through a cover mask that protects the
//! pixels above and below the text.

use crate::draw::DrawMode;
use crate::font::low_bits;
use crate::framebuffer::FrameBuffer;
use crate::layout::{LineBuffer, VerticalLayout};
use crate::scroll::SCROLL_GAP;

/// Text placement inside the cursor zone
///
/// Vertical text reads `Left` as top and `Right` as bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Scrolls through the zone when scrolling is enabled, left-aligned
    /// otherwise
    Scroll,
}

impl Align {
    /// Vertical alias for [`Align::Left`]
    pub const TOP: Align = Align::Left;
    /// Vertical alias for [`Align::Right`]
    pub const BOTTOM: Align = Align::Right;
}

/// Text anchor and zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Left edge of the zone
    pub x: i32,
    /// Top edge of the zone
    pub y: i32,
    pub align: Align,
    /// Horizontal text: inclusive right edge of the zone.
    /// Vertical text: zone height.
    /// `None` extends the zone to the screen edge.
    pub bound: Option<i32>,
}

impl Cursor {
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            align: Align::Left,
            bound: None,
        }
    }

    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn with_bound(mut self, bound: i32) -> Self {
        self.bound = Some(bound);
        self
    }
}

/// Scroll position handed to the compositor for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    /// Raw scroll offset in pixels
    pub offset: u32,
    /// Repeat the text after the gap
    pub looped: bool,
}

/// Writes one source byte whose top row lands on screen row `y`.
fn put_byte<const W: usize, const P: usize>(
    fb: &mut FrameBuffer<W, P>,
    x: i32,
    y: i32,
    data: u8,
    mode: DrawMode,
) {
    if data == 0 && mode.skips_blank() {
        return;
    }
    let page = y.div_euclid(8);
    let off = y.rem_euclid(8) as u32;

    fb.apply(x, page, data << off, 0xFF << off, mode);
    if off > 0 {
        fb.apply(x, page + 1, data >> (8 - off), 0xFF >> (8 - off), mode);
    }
}

/// Composites a horizontal line into the zone `[cursor.x, right]`.
///
/// With `scroll` set the line slides through the zone; otherwise it is
/// placed by `cursor.align`. Columns outside the text are left untouched.
pub fn composite_line<const W: usize, const P: usize>(
    fb: &mut FrameBuffer<W, P>,
    line: &LineBuffer,
    cursor: &Cursor,
    mode: DrawMode,
    scroll: Option<ScrollWindow>,
) {
    // Zone arithmetic is widened so any cursor and bound clip cleanly
    let left = i64::from(cursor.x);
    let right = cursor.bound.map_or(W as i64 - 1, i64::from);
    let region = right - left + 1;
    if region <= 0 {
        return;
    }
    let width = line.width() as i64;
    let loop_width = if width > 0 {
        width + i64::from(SCROLL_GAP)
    } else {
        0
    };

    // Source column for zone column `i`, or None for blank
    let source = |i: i64| -> Option<usize> {
        let src = match scroll {
            Some(window) => {
                if loop_width == 0 {
                    return None;
                }
                let off = i64::from(window.offset) % loop_width;
                if window.looped {
                    (off + i) % loop_width
                } else {
                    off + i
                }
            }
            None => {
                let start = match cursor.align {
                    Align::Left | Align::Scroll => left,
                    Align::Center => left + region / 2 - width / 2,
                    Align::Right => left + region - width,
                };
                i - (start - left)
            }
        };
        (0..width).contains(&src).then_some(src as usize)
    };

    // Only zone columns that land on screen are visited
    let first = (-left).max(0);
    let end = region.min(W as i64 - left);
    for i in first..end {
        let x = (left + i) as i32;
        let Some(src) = source(i) else {
            continue;
        };
        for page in 0..line.pages() {
            let data = line.column(src, page);
            put_byte(fb, x, cursor.y.saturating_add(page as i32 * 8), data, mode);
        }
    }
}

/// Bits of `page` that fall inside rows `[top, bottom)`
fn zone_mask(page: i32, top: i32, bottom: i32) -> u8 {
    let first = (top - page * 8).clamp(0, 8) as u32;
    let end = (bottom - page * 8).clamp(0, 8) as u32;
    if end <= first {
        return 0;
    }
    (low_bits(end) & !low_bits(first)) as u8
}

/// Composites a vertical stack at `cursor`, clipped to the zone rows.
pub fn composite_stack<const W: usize, const P: usize>(
    fb: &mut FrameBuffer<W, P>,
    layout: &VerticalLayout<'_>,
    cursor: &Cursor,
    spacing: u8,
    mode: DrawMode,
    scroll: Option<ScrollWindow>,
) {
    let height = (P * 8) as i64;
    let y0 = i64::from(cursor.y);
    let zone_height = match cursor.bound {
        Some(h) if h > 0 => i64::from(h),
        _ => height - y0,
    };
    let top = y0.max(0);
    let bottom = (y0 + zone_height).min(height);
    if bottom <= top {
        return;
    }
    // Both lie in 0..=height
    let rows = (top as i32, bottom as i32);
    let total = i64::from(layout.total_height());

    match scroll {
        Some(window) => {
            if total <= 0 {
                return;
            }
            let cycle = total + i64::from(SCROLL_GAP);
            let start = y0 - i64::from(window.offset) % cycle;
            place_stack(fb, layout, cursor.x, start, spacing, mode, rows);
            if window.looped {
                place_stack(fb, layout, cursor.x, start + cycle, spacing, mode, rows);
            }
        }
        None => {
            let start = match cursor.align {
                Align::Left | Align::Scroll => y0,
                Align::Center => y0 + (zone_height - total) / 2,
                Align::Right => y0 + zone_height - total,
            };
            place_stack(fb, layout, cursor.x, start, spacing, mode, rows);
        }
    }
}

fn place_stack<const W: usize, const P: usize>(
    fb: &mut FrameBuffer<W, P>,
    layout: &VerticalLayout<'_>,
    x: i32,
    start_y: i64,
    spacing: u8,
    mode: DrawMode,
    (top, bottom): (i32, i32),
) {
    let mut y = start_y;
    for glyph in layout.glyphs() {
        let block_end = y + i64::from(glyph.real_height);
        let visible = y < i64::from(bottom) && block_end > i64::from(top);

        if visible && glyph.glyph.is_some() {
            // A visible block starts less than one glyph above row 0
            let y = y as i32;
            let first_page = y.div_euclid(8);
            let off = y.rem_euclid(8) as u32;
            let cover = (low_bits(glyph.real_height as u32) as u128) << off;

            for col in 0..glyph.width() {
                let mut data = (glyph.cropped_column(col) as u128) << off;
                let mut mask = cover;
                let mut page = first_page;
                while mask != 0 {
                    let clip = mask as u8 & zone_mask(page, top, bottom);
                    if clip != 0 {
                        fb.apply(x.saturating_add(col as i32), page, data as u8, clip, mode);
                    }
                    data >>= 8;
                    mask >>= 8;
                    page += 1;
                }
            }
        }
        y = block_end + i64::from(spacing);
    }
}
