//! Rendering engine
//!
//! [`Display`] owns the framebuffer and every piece of text state. A frame
//! is built by placing the cursor, appending text runs, and rendering them
//! horizontally or vertically; primitives draw straight into
//! [`Display::frame_mut`]. Nothing is sent to the panel until
//! [`Display::flush`].

use crate::compositor::{composite_line, composite_stack, Align, Cursor, ScrollWindow};
use crate::config::DisplayConfig;
use crate::draw::DrawMode;
use crate::flush::{self, FlushError, FlushMode};
use crate::font::GlyphSource;
use crate::framebuffer::FrameBuffer;
use crate::layout::{LineBuffer, VerticalLayout};
use crate::scroll::ScrollState;
use crate::text::{TextError, TextLine};
use crate::transport::Transport;

/// Text and graphics engine for a `W` x `P * 8` panel
pub struct Display<'f, const W: usize, const P: usize> {
    frame: FrameBuffer<W, P>,
    line: TextLine<'f>,
    layout: LineBuffer,
    stack: VerticalLayout<'f>,
    stack_dirty: bool,
    cursor: Cursor,
    font: &'f dyn GlyphSource,
    mode: DrawMode,
    spacing: u8,
    scroll_enabled: bool,
    h_scroll: ScrollState,
    v_scroll: ScrollState,
}

/// Engine for 128x64 panels
pub type Display128x64<'f> = Display<'f, 128, 8>;

/// Engine for 128x32 panels
pub type Display128x32<'f> = Display<'f, 128, 4>;

impl<const W: usize, const P: usize> core::fmt::Debug for Display<'_, W, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Display")
            .field("cursor", &self.cursor)
            .field("mode", &self.mode)
            .field("spacing", &self.spacing)
            .field("scroll_enabled", &self.scroll_enabled)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

impl<'f, const W: usize, const P: usize> Display<'f, W, P> {
    /// Creates an engine with a blank frame, drawing text in `font`.
    pub const fn new(font: &'f dyn GlyphSource) -> Self {
        Self {
            frame: FrameBuffer::new(),
            line: TextLine::new(),
            layout: LineBuffer::new(),
            stack: VerticalLayout::new(),
            stack_dirty: true,
            cursor: Cursor::new(0, 0),
            font,
            mode: DrawMode::Replace,
            spacing: 1,
            scroll_enabled: false,
            h_scroll: ScrollState::new(),
            v_scroll: ScrollState::new(),
        }
    }

    /// Places the text cursor and starts a new line.
    ///
    /// Text appended before this call is discarded.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.line.clear();
        self.stack_dirty = true;
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Font for subsequent appends
    pub fn set_font(&mut self, font: &'f dyn GlyphSource) {
        self.font = font;
    }

    pub fn font(&self) -> &'f dyn GlyphSource {
        self.font
    }

    /// Mode for text rendering. Primitives take their mode per call.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.mode
    }

    /// Blank columns (rows for vertical text) between glyphs
    pub fn set_char_spacing(&mut self, spacing: u8) {
        if spacing != self.spacing {
            self.spacing = spacing;
            self.line.mark_dirty();
            self.stack_dirty = true;
        }
    }

    pub fn char_spacing(&self) -> u8 {
        self.spacing
    }

    /// Enables scrolling for lines placed with [`Align::Scroll`].
    pub fn set_scroll(&mut self, enabled: bool) {
        if enabled && !self.scroll_enabled {
            self.reset_scroll();
        }
        self.scroll_enabled = enabled;
    }

    pub fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    /// Horizontal scroll speed (clamped to 1..=10) and wrap-around
    pub fn set_scroll_speed(&mut self, speed: u8, looped: bool) {
        self.h_scroll.set_speed(speed);
        self.h_scroll.set_loop(looped);
    }

    /// Vertical scroll speed (clamped to 1..=10) and wrap-around
    pub fn set_vertical_scroll_speed(&mut self, speed: u8, looped: bool) {
        self.v_scroll.set_speed(speed);
        self.v_scroll.set_loop(looped);
    }

    /// Restarts both scroll axes from offset zero at the next render.
    pub fn reset_scroll(&mut self) {
        self.h_scroll.request_reset();
        self.v_scroll.request_reset();
    }

    /// Appends text in the current font.
    pub fn print(&mut self, text: &str) -> Result<(), TextError> {
        self.stack_dirty = true;
        self.line.push_str(text, self.font)
    }

    /// Appends a signed integer, zero-padded to `width` characters.
    pub fn print_int(&mut self, value: i64, width: usize) -> Result<(), TextError> {
        self.stack_dirty = true;
        self.line.push_int(value, width, self.font)
    }

    /// Appends an unsigned integer, zero-padded to `width` characters.
    pub fn print_uint(&mut self, value: u64, width: usize) -> Result<(), TextError> {
        self.stack_dirty = true;
        self.line.push_uint(value, width, self.font)
    }

    /// Appends a float with `decimals` fractional digits, zero-padded to
    /// `width` characters.
    pub fn print_float(&mut self, value: f32, decimals: usize, width: usize) -> Result<(), TextError> {
        self.stack_dirty = true;
        self.line.push_float(value, decimals, width, self.font)
    }

    fn refresh_layout(&mut self) {
        if self.line.is_dirty() {
            self.layout.rebuild(&self.line, self.spacing);
            self.line.mark_clean();
        }
    }

    fn refresh_stack(&mut self) {
        if self.stack_dirty {
            self.stack = VerticalLayout::measure(&self.line, self.spacing);
            self.stack_dirty = false;
        }
    }

    fn scrolling(&self) -> bool {
        self.scroll_enabled && self.cursor.align == Align::Scroll
    }

    /// Renders the current line left to right at the cursor.
    ///
    /// `now_ms` drives scrolling and is ignored otherwise.
    pub fn draw_print(&mut self, now_ms: u64) {
        if self.line.is_empty() && !self.scroll_enabled {
            return;
        }
        self.refresh_layout();

        let scroll = self.scrolling().then(|| ScrollWindow {
            offset: self.h_scroll.advance(now_ms, self.cursor.y),
            looped: self.h_scroll.is_looped(),
        });
        composite_line(&mut self.frame, &self.layout, &self.cursor, self.mode, scroll);
    }

    /// Renders the current line as a top-to-bottom stack at the cursor.
    ///
    /// The measured stack is reused until the line or spacing changes.
    /// Alignment reads `Left` as top and `Right` as bottom.
    pub fn draw_print_vertical(&mut self, now_ms: u64) {
        if self.line.is_empty() {
            return;
        }
        self.refresh_stack();

        let scroll = self.scrolling().then(|| ScrollWindow {
            offset: self.v_scroll.advance(now_ms, self.cursor.x),
            looped: self.v_scroll.is_looped(),
        });
        composite_stack(
            &mut self.frame,
            &self.stack,
            &self.cursor,
            self.spacing,
            self.mode,
            scroll,
        );
    }

    /// Width of the current line in pixels
    pub fn text_width(&mut self) -> usize {
        self.refresh_layout();
        self.layout.width()
    }

    /// Height of the tallest font on the current line
    pub fn text_height(&self) -> u8 {
        self.line.max_height()
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Repeats `pattern` over every byte of the frame.
    pub fn fill(&mut self, pattern: u8) {
        self.frame.fill(pattern);
    }

    pub fn frame(&self) -> &FrameBuffer<W, P> {
        &self.frame
    }

    /// Framebuffer access for primitives
    pub fn frame_mut(&mut self) -> &mut FrameBuffer<W, P> {
        &mut self.frame
    }

    /// Uploads the frame through `transport`.
    pub fn flush<T: Transport>(
        &self,
        transport: &mut T,
        mode: FlushMode,
    ) -> Result<(), FlushError<T::Error>> {
        flush::flush(&self.frame, transport, mode)
    }

    /// Applies stored settings. Returns the flush mode to use.
    pub fn apply_config(&mut self, config: &DisplayConfig) -> FlushMode {
        let config = config.validated();
        self.set_draw_mode(config.draw_mode);
        self.set_char_spacing(config.char_spacing);
        self.set_scroll(config.scroll_enabled);
        self.set_scroll_speed(config.scroll_speed, config.scroll_loop);
        self.set_vertical_scroll_speed(config.vertical_scroll_speed, config.vertical_scroll_loop);
        config.flush_mode
    }

    /// Snapshot of the current settings
    pub fn config(&self, flush_mode: FlushMode) -> DisplayConfig {
        DisplayConfig {
            draw_mode: self.mode,
            char_spacing: self.spacing,
            scroll_enabled: self.scroll_enabled,
            scroll_speed: self.h_scroll.speed(),
            scroll_loop: self.h_scroll.is_looped(),
            vertical_scroll_speed: self.v_scroll.speed(),
            vertical_scroll_loop: self.v_scroll.is_looped(),
            flush_mode,
            ..DisplayConfig::new()
        }
    }
}
