//! Text layout engines

pub mod line;
pub mod vertical;

pub use line::{LineBuffer, LINE_PAGES, LINE_WIDTH};
pub use vertical::{blank_height, StackedGlyph, VerticalLayout, MAX_VERTICAL_GLYPHS};
