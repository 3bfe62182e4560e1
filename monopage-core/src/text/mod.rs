//! Text input: byte decoding and the per-line segment store

pub mod decoder;
pub mod segments;

pub use decoder::{decode, Decoder};
pub use segments::{TextError, TextLine, MAX_SEGMENTS, TEXT_CAPACITY};
