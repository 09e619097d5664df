//! pixkit Core - Basic data structures for image filtering
//!
//! This crate provides the fundamental data structures used throughout
//! the pixkit image filtering library:
//!
//! - [`PixelBuffer`] - The image container
//! - [`Mode`] - Pixel encoding (grayscale, float, RGB, RGBA, palette)
//! - [`Palette`] - Color table for palette-indexed images
//! - [`RasterDecoder`] - Collaborator interface for external decoders

pub mod buffer;
pub mod decode;
pub mod error;
pub mod mode;
pub mod palette;

pub use buffer::PixelBuffer;
pub use decode::{DecodedImage, ImageMetadata, RasterDecoder};
pub use error::{Error, Result};
pub use mode::{MAX_SAMPLE, Mode};
pub use palette::{MAX_PALETTE_ENTRIES, Palette, Rgba};
