//! Error types for pixkit-filter
//!
//! Specs are validated when they are built, so `InvalidSpec` never reaches
//! an engine through the dispatcher. Engines called directly with raw
//! parameters run the same checks before touching a pixel.

use pixkit_core::{Mode, PixelBuffer};
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// Malformed filter parameters
    #[error("invalid filter spec: {0}")]
    InvalidSpec(String),

    /// The image mode cannot be processed by this filter
    #[error("{operation} filter does not support mode {mode}")]
    UnsupportedMode {
        /// Filter name
        operation: &'static str,
        /// Offending mode
        mode: Mode,
    },

    /// A color table produces more channels than the target mode holds
    #[error("{table_channels}-channel table does not fit mode {mode}")]
    DimensionMismatch {
        /// Channels per table entry
        table_channels: usize,
        /// Target mode
        mode: Mode,
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Refuse palette-indexed input.
pub(crate) fn reject_palette(image: &PixelBuffer, operation: &'static str) -> FilterResult<()> {
    if image.mode().is_palette() {
        return Err(FilterError::UnsupportedMode {
            operation,
            mode: image.mode(),
        });
    }
    Ok(())
}
