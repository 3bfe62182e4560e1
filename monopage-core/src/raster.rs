//! Vector primitives
//!
//! Every algorithm here ends in [`FrameBuffer::set_pixel`], so clipping and
//! draw-mode handling live in exactly one place. Each shape writes every
//! pixel once, which keeps `Xor` drawing self-inverting.

use crate::draw::DrawMode;
use crate::framebuffer::FrameBuffer;

/// Largest radius accepted by circle and rounded-rect primitives
pub const MAX_RADIUS: i32 = 255;

/// Sample cap for one Bezier curve
pub const MAX_BEZIER_STEPS: u32 = 4096;

/// Off-screen slack kept when clamping shape extents; wider than any arc
const CLIP_MARGIN: i32 = MAX_RADIUS + 2;

/// Shape style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fill {
    /// Border only
    #[default]
    Outline,
    /// Solid interior
    Solid,
}

/// Quadrant selector for rounded-rect corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Sign of the (dx, dy) reflection for this quadrant
    const fn signs(self) -> (i32, i32) {
        match self {
            Corner::TopRight => (1, -1),
            Corner::TopLeft => (-1, -1),
            Corner::BottomLeft => (-1, 1),
            Corner::BottomRight => (1, 1),
        }
    }
}

/// Midpoint circle walk over the first octant.
///
/// Calls `plot(x, y)` for each step with `0 <= x <= y`.
fn midpoint_octant(r: i32, mut plot: impl FnMut(i32, i32)) {
    let mut f = 1 - r;
    let mut ddf_x = 1;
    let mut ddf_y = -2 * r;
    let mut x = 0;
    let mut y = r;

    while y >= x {
        plot(x, y);
        if f >= 0 {
            y -= 1;
            ddf_y += 2;
            f += ddf_y;
        }
        x += 1;
        ddf_x += 2;
        f += ddf_x;
    }
}

/// Half-width of a filled circle for every row offset `0..=r`.
///
/// Runs the midpoint recurrence without drawing and keeps, per row, the
/// widest half-span seen by either octant reflection.
fn half_widths(r: i32) -> [u8; MAX_RADIUS as usize + 1] {
    let mut hw = [0u8; MAX_RADIUS as usize + 1];
    midpoint_octant(r, |x, y| {
        let (xu, yu) = (x as usize, y as usize);
        hw[yu] = hw[yu].max(x as u8);
        hw[xu] = hw[xu].max(y as u8);
    });
    hw
}

/// Column offset to row offset along the first-octant midpoint walk, plus
/// the number of columns walked.
fn octant_rows(r: i32) -> ([u8; MAX_RADIUS as usize + 1], usize) {
    let mut rows = [0u8; MAX_RADIUS as usize + 1];
    let mut steps = 0;
    midpoint_octant(r, |x, y| {
        rows[x as usize] = y as u8;
        steps = x as usize + 1;
    });
    (rows, steps)
}

/// Whether quadrant offset `(dx, dy)` is a point of the arc in `rows`
fn on_quarter_arc(rows: &[u8], steps: usize, dx: i32, dy: i32) -> bool {
    if dx < 0 || dy < 0 {
        return false;
    }
    let (lo, hi) = (dx.min(dy) as usize, dx.max(dy));
    lo < steps && rows[lo] as i32 == hi
}

/// Clamps the span `[start, start + len)` to `limit` plus [`CLIP_MARGIN`] on
/// both sides. On-screen pixels of a shape drawn over the clamped span do
/// not change.
fn clip_span(start: i32, len: i32, limit: usize) -> (i32, i32) {
    let lo = start.max(-CLIP_MARGIN);
    let hi = start.saturating_add(len).min(limit as i32 + CLIP_MARGIN);
    (lo, hi - lo)
}

/// Endpoints beyond this distance from the origin are clipped before a line
/// is walked
const LINE_LIMIT: i32 = 1 << 15;

/// Liang-Barsky clip of a segment to the screen plus [`CLIP_MARGIN`].
///
/// Runs in `f64` so endpoints anywhere in the `i32` range stay exact enough
/// for the on-screen part.
fn clip_segment(
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    width: usize,
    height: usize,
) -> Option<((i32, i32), (i32, i32))> {
    let (fx, fy) = (x0 as f64, y0 as f64);
    let (dx, dy) = (x1 as f64 - fx, y1 as f64 - fy);
    let lo = -(CLIP_MARGIN as f64);
    let hi_x = (width as i32 + CLIP_MARGIN) as f64;
    let hi_y = (height as i32 + CLIP_MARGIN) as f64;

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, fx - lo), (dx, hi_x - fx), (-dy, fy - lo), (dy, hi_y - fy)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| (round_half_up_wide(fx + t * dx), round_half_up_wide(fy + t * dy));
    Some((at(t0), at(t1)))
}

/// `floor(v + 0.5)` for clipped `f64` coordinates
fn round_half_up_wide(v: f64) -> i32 {
    let t = v + 0.5;
    let i = t as i32;
    if (i as f64) > t {
        i - 1
    } else {
        i
    }
}

/// `floor(v + 0.5)` without `std`
fn round_half_up(v: f32) -> i32 {
    let t = v + 0.5;
    let i = t as i32;
    if (i as f32) > t {
        i - 1
    } else {
        i
    }
}

impl<const WIDTH: usize, const PAGES: usize> FrameBuffer<WIDTH, PAGES> {
    /// Draws a line between two points (Bresenham), both ends inclusive.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: DrawMode) {
        let far = |v: i32| !(-LINE_LIMIT..=LINE_LIMIT).contains(&v);
        if far(x0) || far(y0) || far(x1) || far(y1) {
            let Some(((a, b), (c, d))) = clip_segment((x0, y0), (x1, y1), WIDTH, self.height())
            else {
                return;
            };
            self.walk_line(a, b, c, d, mode);
        } else {
            self.walk_line(x0, y0, x1, y1, mode);
        }
    }

    /// Bresenham walk for endpoints within [`LINE_LIMIT`]
    fn walk_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, mode: DrawMode) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, mode);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws a horizontal run of `w` pixels starting at `(x, y)`.
    pub fn hline(&mut self, x: i32, y: i32, w: i32, mode: DrawMode) {
        if w <= 0 || y < 0 || y >= self.height() as i32 {
            return;
        }
        let start = x.max(0);
        let end = x.saturating_add(w).min(WIDTH as i32);
        for px in start..end {
            self.set_pixel(px, y, mode);
        }
    }

    /// Draws a vertical run of `h` pixels starting at `(x, y)`.
    pub fn vline(&mut self, x: i32, y: i32, h: i32, mode: DrawMode) {
        if h <= 0 || x < 0 || x >= WIDTH as i32 {
            return;
        }
        let start = y.max(0);
        let end = y.saturating_add(h).min(self.height() as i32);
        for py in start..end {
            self.set_pixel(x, py, mode);
        }
    }

    /// Draws a circle centred on `(x0, y0)`.
    ///
    /// Negative radii and radii above [`MAX_RADIUS`] draw nothing.
    pub fn circle(&mut self, x0: i32, y0: i32, r: i32, mode: DrawMode, fill: Fill) {
        if !(0..=MAX_RADIUS).contains(&r) {
            return;
        }
        let (w, h) = (WIDTH as i32, self.height() as i32);
        if x0 < -r || y0 < -r || x0 >= w + r || y0 >= h + r {
            return;
        }
        if mode == DrawMode::EraseBorder && fill == Fill::Solid {
            self.circle(x0, y0, r, DrawMode::Erase, Fill::Solid);
            self.circle(x0, y0, r, DrawMode::Or, Fill::Outline);
            return;
        }
        if r == 0 {
            self.set_pixel(x0, y0, mode);
            return;
        }

        match fill {
            Fill::Solid => {
                let hw = half_widths(r);
                for i in 0..=r {
                    let w = hw[i as usize] as i32;
                    self.hline(x0 - w, y0 + i, 2 * w + 1, mode);
                    if i != 0 {
                        self.hline(x0 - w, y0 - i, 2 * w + 1, mode);
                    }
                }
            }
            Fill::Outline => {
                midpoint_octant(r, |x, y| {
                    if x == 0 {
                        self.set_pixel(x0, y0 + y, mode);
                        self.set_pixel(x0, y0 - y, mode);
                        self.set_pixel(x0 + y, y0, mode);
                        self.set_pixel(x0 - y, y0, mode);
                        return;
                    }
                    self.set_pixel(x0 + x, y0 + y, mode);
                    self.set_pixel(x0 - x, y0 + y, mode);
                    self.set_pixel(x0 + x, y0 - y, mode);
                    self.set_pixel(x0 - x, y0 - y, mode);
                    // On the diagonal the swapped reflections are the same points
                    if x != y {
                        self.set_pixel(x0 + y, y0 + x, mode);
                        self.set_pixel(x0 - y, y0 + x, mode);
                        self.set_pixel(x0 + y, y0 - x, mode);
                        self.set_pixel(x0 - y, y0 - x, mode);
                    }
                });
            }
        }
    }

    /// Draws an axis-aligned rectangle with its top-left corner at `(x, y)`.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, mode: DrawMode, fill: Fill) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, w) = clip_span(x, w, WIDTH);
        let (y, h) = clip_span(y, h, self.height());
        if w <= 0 || h <= 0 {
            return;
        }
        if mode == DrawMode::EraseBorder && fill == Fill::Solid {
            self.rect(x, y, w, h, DrawMode::Erase, Fill::Solid);
            self.rect(x, y, w, h, DrawMode::Or, Fill::Outline);
            return;
        }

        match fill {
            Fill::Solid => {
                for row in y..y + h {
                    self.hline(x, row, w, mode);
                }
            }
            Fill::Outline if h == 1 => self.hline(x, y, w, mode),
            Fill::Outline if w == 1 => self.vline(x, y, h, mode),
            Fill::Outline => {
                self.hline(x + 1, y, w - 2, mode);
                self.hline(x + 1, y + h - 1, w - 2, mode);
                self.vline(x, y, h, mode);
                self.vline(x + w - 1, y, h, mode);
            }
        }
    }

    /// Draws a rectangle with rounded corners of radius `r`.
    ///
    /// The radius is clamped to half of the smaller side.
    #[allow(clippy::too_many_arguments)]
    pub fn round_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        r: i32,
        mode: DrawMode,
        fill: Fill,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        let r = r.clamp(0, (w / 2).min(h / 2)).min(MAX_RADIUS);
        if mode == DrawMode::EraseBorder && fill == Fill::Solid {
            self.round_rect(x, y, w, h, r, DrawMode::Erase, Fill::Solid);
            self.round_rect(x, y, w, h, r, DrawMode::Or, Fill::Outline);
            return;
        }
        // Radius is settled first; clipping may leave a side shorter than 2r
        let (x, w) = clip_span(x, w, WIDTH);
        let (y, h) = clip_span(y, h, self.height());
        if w <= 0 || h <= 0 {
            return;
        }
        if r == 0 {
            self.rect(x, y, w, h, mode, fill);
            return;
        }

        match fill {
            Fill::Solid => {
                self.rect(x, y + r, w, h - 2 * r, mode, Fill::Solid);

                let hw = half_widths(r);
                for i in 0..r {
                    let inset = r - hw[(r - i) as usize] as i32;
                    let span = w - 2 * inset;
                    self.hline(x + inset, y + i, span, mode);
                    self.hline(x + inset, y + h - 1 - i, span, mode);
                }
            }
            Fill::Outline => {
                // Arc endpoints own the first pixel of every straight edge
                self.hline(x + r + 1, y, w - 2 * r - 2, mode);
                self.hline(x + r + 1, y + h - 1, w - 2 * r - 2, mode);
                self.vline(x, y + r + 1, h - 2 * r - 2, mode);
                self.vline(x + w - 1, y + r + 1, h - 2 * r - 2, mode);

                let (left, right) = (x + r, x + w - r - 1);
                let (top, bottom) = (y + r, y + h - r - 1);
                let corners = [
                    (right, top, Corner::TopRight),
                    (left, top, Corner::TopLeft),
                    (left, bottom, Corner::BottomLeft),
                    (right, bottom, Corner::BottomRight),
                ];
                let (rows, steps) = octant_rows(r);
                for (i, &arc) in corners.iter().enumerate() {
                    self.quarter_circle(arc, &rows, steps, &corners[..i], mode);
                }
            }
        }
    }

    /// Midpoint arc restricted to one quadrant.
    ///
    /// With the radius clamped to half a side, neighbouring arcs meet or
    /// share a centre; pixels already plotted by an arc in `drawn` are
    /// skipped.
    fn quarter_circle(
        &mut self,
        (x0, y0, corner): (i32, i32, Corner),
        rows: &[u8],
        steps: usize,
        drawn: &[(i32, i32, Corner)],
        mode: DrawMode,
    ) {
        let (sx, sy) = corner.signs();
        let covered = |px: i32, py: i32| {
            drawn.iter().any(|&(cx, cy, c)| {
                let (cx_sign, cy_sign) = c.signs();
                on_quarter_arc(rows, steps, (px - cx) * cx_sign, (py - cy) * cy_sign)
            })
        };

        for (x, &y) in rows[..steps].iter().enumerate() {
            let (x, y) = (x as i32, y as i32);
            let points = [(x, y), (y, x)];
            // On the diagonal both reflections are the same pixel
            let count = if x == y { 1 } else { 2 };
            for &(dx, dy) in &points[..count] {
                let (px, py) = (x0 + sx * dx, y0 + sy * dy);
                if !covered(px, py) {
                    self.set_pixel(px, py, mode);
                }
            }
        }
    }

    /// Blits a column-major 1bpp bitmap with its top-left corner at `(x, y)`.
    ///
    /// The source uses the glyph layout: `bitmap[(row / 8) * w + col]`,
    /// bit `row % 8`. Lit bits are drawn with `mode`. Clear bits do nothing,
    /// except under [`DrawMode::Replace`] where they erase the destination
    /// pixel so the background cannot show through.
    pub fn bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32, mode: DrawMode) {
        if w <= 0 || h <= 0 {
            return;
        }
        let height = self.height() as i32;
        if x >= WIDTH as i32 || y >= height || x.saturating_add(w) <= 0 || y.saturating_add(h) <= 0 {
            return;
        }

        // Only the on-screen part of the source is visited
        let cols = x.saturating_neg().max(0)..w.min((WIDTH as i32).saturating_sub(x));
        let rows = y.saturating_neg().max(0)..h.min(height.saturating_sub(y));
        for col in cols {
            for row in rows.clone() {
                let (px, py) = (x + col, y + row);
                let idx = ((row / 8) as usize)
                    .saturating_mul(w as usize)
                    .saturating_add(col as usize);
                let Some(&byte) = bitmap.get(idx) else {
                    continue;
                };

                if byte & (1 << (row % 8)) != 0 {
                    self.set_pixel(px, py, mode);
                } else if mode == DrawMode::Replace {
                    self.set_pixel(px, py, DrawMode::Erase);
                }
            }
        }
    }

    /// Draws a quadratic Bezier curve from `(x0, y0)` to `(x2, y2)` pulled
    /// towards the control point `(x1, y1)`.
    ///
    /// Consecutive samples landing on the same pixel are drawn once.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        mode: DrawMode,
    ) {
        let steps = x1
            .abs_diff(x0)
            .saturating_add(y1.abs_diff(y0))
            .saturating_add(x2.abs_diff(x1))
            .saturating_add(y2.abs_diff(y1))
            .clamp(4, MAX_BEZIER_STEPS);
        let (fx0, fy0, fx1, fy1, fx2, fy2) = (
            x0 as f32, y0 as f32, x1 as f32, y1 as f32, x2 as f32, y2 as f32,
        );

        let mut last = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            let bx = u * u * fx0 + 2.0 * u * t * fx1 + t * t * fx2;
            let by = u * u * fy0 + 2.0 * u * t * fy1 + t * t * fy2;

            let point = (round_half_up(bx), round_half_up(by));
            if last != Some(point) {
                self.set_pixel(point.0, point.1, mode);
                last = Some(point);
            }
        }
    }

    /// Draws a curve from `(x0, y0)` to `(x2, y2)` that passes through
    /// `(xp, yp)` at its midpoint (handy for graph peaks).
    #[allow(clippy::too_many_arguments)]
    pub fn peak(
        &mut self,
        x0: i32,
        y0: i32,
        xp: i32,
        yp: i32,
        x2: i32,
        y2: i32,
        mode: DrawMode,
    ) {
        // B(0.5) = (P0 + 2*C + P2) / 4 = peak  =>  C = 2*peak - (P0 + P2) / 2
        let mid_x = (x0 as f32 + x2 as f32) / 2.0;
        let mid_y = (y0 as f32 + y2 as f32) / 2.0;
        let cx = (2.0 * xp as f32 - mid_x) as i32;
        let cy = (2.0 * yp as f32 - mid_y) as i32;
        self.bezier(x0, y0, cx, cy, x2, y2, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer128x64;
    use proptest::prelude::*;

    fn lit(fb: &FrameBuffer128x64) -> usize {
        fb.as_bytes().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn test_line_hits_both_endpoints() {
        let mut fb = FrameBuffer128x64::new();
        fb.line(2, 3, 20, 9, DrawMode::Or);
        assert_eq!(fb.pixel(2, 3), Some(true));
        assert_eq!(fb.pixel(20, 9), Some(true));
        // One pixel per step along the major axis
        assert_eq!(lit(&fb), 19);
    }

    #[test]
    fn test_line_is_symmetric() {
        let mut a = FrameBuffer128x64::new();
        let mut b = FrameBuffer128x64::new();
        a.line(0, 0, 10, 10, DrawMode::Or);
        b.line(10, 10, 0, 0, DrawMode::Or);
        assert_eq!(a, b);
        assert_eq!(lit(&a), 11);
    }

    #[test]
    fn test_hline_vline_clip() {
        let mut fb = FrameBuffer128x64::new();
        fb.hline(-5, 0, 10, DrawMode::Or);
        assert_eq!(lit(&fb), 5);

        fb.clear();
        fb.vline(127, 60, 10, DrawMode::Or);
        assert_eq!(lit(&fb), 4);

        fb.clear();
        fb.hline(0, 64, 10, DrawMode::Or);
        fb.vline(0, 0, 0, DrawMode::Or);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_circle_outline_is_symmetric() {
        let mut fb = FrameBuffer128x64::new();
        fb.circle(32, 32, 10, DrawMode::Or, Fill::Outline);

        for (dx, dy) in [(0, 10), (10, 0), (0, -10), (-10, 0)] {
            assert_eq!(fb.pixel(32 + dx, 32 + dy), Some(true));
        }
        assert_eq!(fb.pixel(32, 32), Some(false));
        for y in 0..64 {
            for d in 0..32 {
                assert_eq!(fb.pixel(32 + d, y), fb.pixel(32 - d, y));
            }
        }
    }

    #[test]
    fn test_circle_outline_writes_each_pixel_once() {
        let mut or = FrameBuffer128x64::new();
        let mut xor = FrameBuffer128x64::new();
        or.circle(40, 30, 12, DrawMode::Or, Fill::Outline);
        xor.circle(40, 30, 12, DrawMode::Xor, Fill::Outline);
        assert_eq!(or, xor);
    }

    #[test]
    fn test_zero_and_negative_radius() {
        let mut fb = FrameBuffer128x64::new();
        fb.circle(5, 5, -1, DrawMode::Or, Fill::Solid);
        assert_eq!(lit(&fb), 0);
        fb.circle(5, 5, 0, DrawMode::Or, Fill::Solid);
        assert_eq!(lit(&fb), 1);
    }

    #[test]
    fn test_erase_border_circle_is_opaque() {
        let mut fb = FrameBuffer128x64::new();
        fb.fill(0xFF);
        fb.circle(64, 32, 8, DrawMode::EraseBorder, Fill::Solid);

        assert_eq!(fb.pixel(64, 32), Some(false));
        assert_eq!(fb.pixel(64, 24), Some(true));
        assert_eq!(fb.pixel(72, 32), Some(true));
        // Outside the shape is untouched
        assert_eq!(fb.pixel(0, 0), Some(true));
    }

    #[test]
    fn test_rect_outline_pixel_count() {
        let mut fb = FrameBuffer128x64::new();
        fb.rect(10, 10, 20, 8, DrawMode::Xor, Fill::Outline);
        assert_eq!(lit(&fb), 2 * 20 + 2 * 8 - 4);
        assert_eq!(fb.pixel(10, 10), Some(true));
        assert_eq!(fb.pixel(29, 17), Some(true));
    }

    #[test]
    fn test_rect_filled_and_degenerate() {
        let mut fb = FrameBuffer128x64::new();
        fb.rect(0, 0, 4, 3, DrawMode::Or, Fill::Solid);
        assert_eq!(lit(&fb), 12);

        fb.clear();
        fb.rect(0, 0, 5, 1, DrawMode::Xor, Fill::Outline);
        assert_eq!(lit(&fb), 5);

        fb.clear();
        fb.rect(0, 0, 0, 5, DrawMode::Or, Fill::Solid);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_erase_border_rect() {
        let mut fb = FrameBuffer128x64::new();
        fb.fill(0xFF);
        fb.rect(8, 8, 10, 10, DrawMode::EraseBorder, Fill::Solid);
        assert_eq!(fb.pixel(12, 12), Some(false));
        assert_eq!(fb.pixel(8, 8), Some(true));
        assert_eq!(fb.pixel(17, 17), Some(true));
    }

    #[test]
    fn test_round_rect_outline_skips_corners() {
        let mut fb = FrameBuffer128x64::new();
        fb.round_rect(10, 10, 30, 20, 5, DrawMode::Xor, Fill::Outline);

        // Sharp corner pixels are cut away by the arcs
        assert_eq!(fb.pixel(10, 10), Some(false));
        assert_eq!(fb.pixel(39, 29), Some(false));
        // Edges are present between the arcs
        assert_eq!(fb.pixel(25, 10), Some(true));
        assert_eq!(fb.pixel(10, 20), Some(true));
        assert_eq!(fb.pixel(39, 20), Some(true));
        assert_eq!(fb.pixel(25, 29), Some(true));
        // Arc endpoints meet the edges
        assert_eq!(fb.pixel(15, 10), Some(true));
        assert_eq!(fb.pixel(10, 15), Some(true));

        let mut or = FrameBuffer128x64::new();
        or.round_rect(10, 10, 30, 20, 5, DrawMode::Or, Fill::Outline);
        assert_eq!(or, fb);
    }

    #[test]
    fn test_round_rect_filled_rows_are_spans() {
        let mut fb = FrameBuffer128x64::new();
        fb.round_rect(4, 4, 40, 24, 8, DrawMode::Xor, Fill::Solid);

        for y in 4..28 {
            let row: Vec<bool> = (0..128).map(|x| fb.pixel(x, y) == Some(true)).collect();
            let first = row.iter().position(|&p| p).unwrap();
            let last = row.iter().rposition(|&p| p).unwrap();
            assert!(row[first..=last].iter().all(|&p| p), "row {y} has a gap");
            // Symmetric about the rectangle's vertical axis
            assert_eq!(first - 4, 43 - last);
        }
        // Middle rows span the whole width
        assert_eq!(fb.pixel(4, 16), Some(true));
        assert_eq!(fb.pixel(43, 16), Some(true));
        assert_eq!(fb.pixel(4, 4), Some(false));
    }

    #[test]
    fn test_round_rect_radius_is_clamped() {
        let mut a = FrameBuffer128x64::new();
        let mut b = FrameBuffer128x64::new();
        a.round_rect(0, 0, 10, 6, 50, DrawMode::Or, Fill::Solid);
        b.round_rect(0, 0, 10, 6, 3, DrawMode::Or, Fill::Solid);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pill_round_rect_writes_each_pixel_once() {
        // Radius clamped to half a side: neighbouring arcs touch or share a centre
        for (w, h, r) in [(11, 20, 5), (10, 20, 5), (20, 11, 5), (9, 9, 4), (2, 2, 1), (3, 2, 1)] {
            let mut or = FrameBuffer128x64::new();
            let mut xor = FrameBuffer128x64::new();
            or.round_rect(10, 10, w, h, r, DrawMode::Or, Fill::Outline);
            xor.round_rect(10, 10, w, h, r, DrawMode::Xor, Fill::Outline);
            assert_eq!(or, xor, "{w}x{h} r={r}");
            assert!(lit(&or) > 0);
        }
    }

    #[test]
    fn test_square_round_rect_is_a_circle() {
        let mut rounded = FrameBuffer128x64::new();
        rounded.round_rect(10, 10, 9, 9, 4, DrawMode::Xor, Fill::Outline);
        let mut circle = FrameBuffer128x64::new();
        circle.circle(14, 14, 4, DrawMode::Xor, Fill::Outline);
        assert_eq!(rounded, circle);
    }

    #[test]
    fn test_extreme_extents_are_clipped() {
        let mut fb = FrameBuffer128x64::new();
        fb.rect(-5, -5, i32::MAX, i32::MAX, DrawMode::Or, Fill::Solid);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));

        let mut fb = FrameBuffer128x64::new();
        fb.round_rect(-5, -5, i32::MAX, i32::MAX, 10, DrawMode::Xor, Fill::Solid);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));

        let mut fb = FrameBuffer128x64::new();
        fb.rect(i32::MAX, i32::MAX, i32::MAX, i32::MAX, DrawMode::Or, Fill::Outline);
        fb.round_rect(i32::MIN, i32::MIN, 100, 100, 20, DrawMode::Or, Fill::Outline);
        fb.circle(i32::MAX, i32::MIN, 30, DrawMode::Or, Fill::Solid);
        fb.bezier(i32::MIN, 0, 0, i32::MAX, i32::MAX, 0, DrawMode::Or);
        fb.peak(i32::MIN, i32::MIN, i32::MAX, i32::MAX, i32::MIN, i32::MAX, DrawMode::Or);
        fb.bitmap(i32::MIN, i32::MIN, &[0xFF; 8], i32::MAX, i32::MAX, DrawMode::Or);

        // Wide bitmap: only the on-screen columns are visited
        fb.bitmap(-3, 0, &[0xFF; 8], i32::MAX, 8, DrawMode::Or);
        assert_eq!(lit(&fb), 5 * 8);
    }

    #[test]
    fn test_far_line_endpoints_are_clipped() {
        let mut fb = FrameBuffer128x64::new();
        fb.line(i32::MIN, 10, i32::MAX, 10, DrawMode::Or);
        assert_eq!(lit(&fb), 128);
        assert!((0..128).all(|x| fb.pixel(x, 10) == Some(true)));

        let mut fb = FrameBuffer128x64::new();
        fb.line(-100_000, -100_000, 100_000, 100_000, DrawMode::Or);
        assert!((0..64).all(|k| fb.pixel(k, k) == Some(true)));
        assert_eq!(lit(&fb), 64);

        let mut fb = FrameBuffer128x64::new();
        fb.line(i32::MIN, i32::MIN, i32::MIN, i32::MAX, DrawMode::Or);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_bitmap_replace_erases_background() {
        // 3x8 bitmap: only the middle column lit
        let bmp = [0x00, 0xFF, 0x00];

        let mut fb = FrameBuffer128x64::new();
        fb.fill(0xFF);
        fb.bitmap(0, 4, &bmp, 3, 8, DrawMode::Replace);
        assert_eq!(fb.pixel(0, 4), Some(false));
        assert_eq!(fb.pixel(1, 4), Some(true));
        assert_eq!(fb.pixel(2, 11), Some(false));
        // Rows above the bitmap keep their background
        assert_eq!(fb.pixel(0, 3), Some(true));

        let mut fb = FrameBuffer128x64::new();
        fb.fill(0xFF);
        fb.bitmap(0, 4, &bmp, 3, 8, DrawMode::Or);
        assert_eq!(fb.pixel(0, 4), Some(true));
    }

    #[test]
    fn test_bitmap_multi_page_source() {
        // 2 columns x 10 rows: page 0 then page 1
        let bmp = [0x01, 0x00, 0x00, 0x02];
        let mut fb = FrameBuffer128x64::new();
        fb.bitmap(5, 5, &bmp, 2, 10, DrawMode::Or);
        assert_eq!(fb.pixel(5, 5), Some(true));
        assert_eq!(fb.pixel(6, 5 + 9), Some(true));
        assert_eq!(lit(&fb), 2);
    }

    #[test]
    fn test_bezier_endpoints_and_dedup() {
        let mut or = FrameBuffer128x64::new();
        let mut xor = FrameBuffer128x64::new();
        or.bezier(0, 60, 30, 0, 60, 60, DrawMode::Or);
        xor.bezier(0, 60, 30, 0, 60, 60, DrawMode::Xor);

        assert_eq!(or.pixel(0, 60), Some(true));
        assert_eq!(or.pixel(60, 60), Some(true));
        // Consecutive duplicates suppressed: XOR leaves every sample lit
        assert_eq!(lit(&or), lit(&xor));
    }

    #[test]
    fn test_peak_passes_through_peak() {
        let mut fb = FrameBuffer128x64::new();
        fb.peak(0, 50, 40, 10, 80, 50, DrawMode::Or);
        assert_eq!(fb.pixel(40, 10), Some(true));
        assert_eq!(fb.pixel(0, 50), Some(true));
        assert_eq!(fb.pixel(80, 50), Some(true));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1.5), 2);
        assert_eq!(round_half_up(1.49), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.6), -2);
    }

    proptest! {
        #[test]
        fn prop_filled_circle_rows_are_convex(x0 in 20i32..108, y0 in 20i32..44, r in 0i32..20) {
            let mut fb = FrameBuffer128x64::new();
            fb.circle(x0, y0, r, DrawMode::Xor, Fill::Solid);

            for i in -r..=r {
                let y = y0 + i;
                let row: Vec<i32> = (0..128).filter(|&x| fb.pixel(x, y) == Some(true)).collect();
                prop_assert!(!row.is_empty());
                let (first, last) = (row[0], row[row.len() - 1]);
                prop_assert_eq!(row.len() as i32, last - first + 1);
                prop_assert_eq!(x0 - first, last - x0);
            }
            prop_assert_eq!(lit(&fb) > 0, true);
        }

        #[test]
        fn prop_xor_shapes_are_self_inverse(
            x in -10i32..130, y in -10i32..70, w in 0i32..60, h in 0i32..40, r in 0i32..15, seed: u8,
        ) {
            let mut fb = FrameBuffer128x64::new();
            fb.fill(seed);
            let before = fb.clone();

            for _ in 0..2 {
                fb.line(x, y, x + w, y + h, DrawMode::Xor);
                fb.circle(x, y, r, DrawMode::Xor, Fill::Outline);
                fb.circle(x, y, r, DrawMode::Xor, Fill::Solid);
                fb.rect(x, y, w, h, DrawMode::Xor, Fill::Outline);
                fb.round_rect(x, y, w, h, r, DrawMode::Xor, Fill::Solid);
                fb.bezier(x, y, x + w, y - h, x + 2 * w, y, DrawMode::Xor);
            }
            prop_assert_eq!(fb, before);
        }

        #[test]
        fn prop_round_rect_outline_writes_each_pixel_once(
            x in -10i32..120, y in -10i32..60, w in 1i32..40, h in 1i32..40, r in 0i32..25,
        ) {
            let mut or = FrameBuffer128x64::new();
            let mut xor = FrameBuffer128x64::new();
            or.round_rect(x, y, w, h, r, DrawMode::Or, Fill::Outline);
            xor.round_rect(x, y, w, h, r, DrawMode::Xor, Fill::Outline);
            prop_assert_eq!(or, xor);
        }

        #[test]
        fn prop_offscreen_primitives_are_noops(dx in 200i32..400, dy in 100i32..300, r in 0i32..50) {
            let mut fb = FrameBuffer128x64::new();
            fb.fill(0x5A);
            let before = fb.clone();

            fb.set_pixel(dx, -dy, DrawMode::Xor);
            fb.line(dx, dy, dx + 10, dy + 10, DrawMode::Xor);
            fb.circle(-dx, -dy, r, DrawMode::Xor, Fill::Solid);
            fb.rect(dx, 0, 10, 10, DrawMode::Erase, Fill::Solid);
            fb.round_rect(0, dy, 30, 30, r, DrawMode::Replace, Fill::Solid);
            fb.bitmap(-dx, 0, &[0xFF; 8], 8, 8, DrawMode::Replace);
            prop_assert_eq!(fb, before);
        }

        #[test]
        fn prop_replace_is_idempotent(x in -10i32..130, y in -10i32..70, w in 1i32..40, h in 1i32..40, seed: u8) {
            let bmp = [0xA5u8; 40 * 5];
            let mut fb = FrameBuffer128x64::new();
            fb.fill(seed);
            fb.bitmap(x, y, &bmp, w, h, DrawMode::Replace);
            let once = fb.clone();
            fb.bitmap(x, y, &bmp, w, h, DrawMode::Replace);
            prop_assert_eq!(fb, once);
        }
    }
}
