//! Error types for pixkit-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::Mode;
use thiserror::Error;

/// pixkit core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample buffer length does not match `width * height * channels`
    #[error("buffer length mismatch: expected {expected} samples, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Pixel coordinate out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Channel index out of bounds for the image mode
    #[error("channel {channel} out of bounds for mode {mode}")]
    ChannelOutOfBounds { channel: usize, mode: Mode },

    /// Sample value not representable in the image mode
    #[error("sample {value} out of range for mode {mode}")]
    SampleOutOfRange { value: f32, mode: Mode },

    /// Requested palette size outside `2..=256`
    #[error("palette size {0} outside 2..=256")]
    PaletteSize(usize),

    /// Palette attached to a non-palette image
    #[error("palette not allowed for mode {0}")]
    PaletteNotAllowed(Mode),

    /// Palette index outside the attached palette
    #[error("palette index {index} >= palette length {len}")]
    PaletteIndex { index: usize, len: usize },

    /// Palette already holds the maximum number of entries
    #[error("palette is full ({0} entries)")]
    PaletteFull(usize),

    /// External decoder failure
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type alias for pixkit core operations
pub type Result<T> = std::result::Result<T, Error>;
