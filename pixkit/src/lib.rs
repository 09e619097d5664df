//! pixkit - Image filtering library for Rust
//!
//! # Overview
//!
//! pixkit applies composable pixel filters to in-memory images:
//!
//! - Convolution with 3x3 and 5x5 kernels, including the stock kernels
//! - Rank filters (median, min, max) and the mode filter
//! - Box and Gaussian blur
//! - Unsharp masking
//! - 3D color lookup tables
//!
//! Image file I/O is not part of the library. Decoders plug in through
//! the [`RasterDecoder`] trait.
//!
//! # Example
//!
//! ```
//! use pixkit::filter::{BlurSpec, FilterDispatcher, FilterSpec, RankSpec};
//! use pixkit::{Mode, PixelBuffer};
//!
//! let image = PixelBuffer::filled(64, 48, Mode::Rgb, &[200.0, 100.0, 50.0]).unwrap();
//! let specs = [
//!     FilterSpec::from(RankSpec::median(3).unwrap()),
//!     FilterSpec::from(BlurSpec::gaussian(2.0).unwrap()),
//! ];
//! let out = FilterDispatcher::new().apply_all(&image, &specs).unwrap();
//! assert_eq!(out.width(), 64);
//! assert_eq!(out.height(), 48);
//! assert_eq!(out, image);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixkit_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use pixkit_filter as filter;
