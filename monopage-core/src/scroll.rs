//! Poll-driven scroll counters
//!
//! Nothing runs in the background: the offset only moves when a render
//! call hands in the current time.

/// Blank columns (or rows) between the end of a scrolling line and its
/// next repetition
pub const SCROLL_GAP: u32 = 30;

/// Slowest scroll speed (10 px/s)
pub const MIN_SPEED: u8 = 1;

/// Fastest scroll speed (100 px/s)
pub const MAX_SPEED: u8 = 10;

/// Speed used until configured
pub const DEFAULT_SPEED: u8 = 3;

/// One scrolling axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    offset: u32,
    last_ms: u64,
    speed: u8,
    looped: bool,
    reset_pending: bool,
    anchor: Option<i32>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub const fn new() -> Self {
        Self {
            offset: 0,
            last_ms: 0,
            speed: DEFAULT_SPEED,
            looped: true,
            reset_pending: true,
            anchor: None,
        }
    }

    /// Sets the speed, clamped to `MIN_SPEED..=MAX_SPEED`.
    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Whether the text repeats after the gap
    pub fn set_loop(&mut self, looped: bool) {
        self.looped = looped;
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// Restarts from offset zero on the next update.
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Milliseconds per pixel step
    pub fn interval_ms(&self) -> u64 {
        1000 / (self.speed as u64 * 10)
    }

    /// Current offset in pixels
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Advances the counter to `now_ms`.
    ///
    /// `anchor` identifies the line being scrolled (its cursor row); a new
    /// anchor restarts the scroll. Time going backwards does nothing.
    pub fn advance(&mut self, now_ms: u64, anchor: i32) -> u32 {
        if self.reset_pending || self.anchor != Some(anchor) {
            self.offset = 0;
            self.last_ms = now_ms;
            self.anchor = Some(anchor);
            self.reset_pending = false;
            return self.offset;
        }

        let interval = self.interval_ms();
        let steps = now_ms.saturating_sub(self.last_ms) / interval;
        if steps >= 1 {
            self.offset = self.offset.wrapping_add(steps as u32);
            self.last_ms += steps * interval;
        }
        self.offset
    }
}
