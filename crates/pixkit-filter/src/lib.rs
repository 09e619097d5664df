//! pixkit-filter - Image filtering operations
//!
//! This crate provides:
//!
//! - Convolution with 3x3 and 5x5 kernels, including the stock kernels
//! - Rank filtering (median, min, max) and the mode filter
//! - Blur operations (box blur with fractional radius, Gaussian blur)
//! - Unsharp masking
//! - 3D color lookup tables with trilinear interpolation
//!
//! Filters are described by a validated [`FilterSpec`] and applied through
//! a [`FilterDispatcher`], or by calling the engine functions directly.
//! Every operation reads its input and returns a new buffer.
//!
//! # Examples
//!
//! ```
//! use pixkit_core::{Mode, PixelBuffer};
//! use pixkit_filter::{BuiltinKernel, FilterSpec, dispatch};
//!
//! let image = PixelBuffer::filled(4, 4, Mode::Rgb, &[10.0, 20.0, 30.0]).unwrap();
//! let spec = FilterSpec::from(BuiltinKernel::Smooth);
//! let out = dispatch(&image, &spec).unwrap();
//! assert!(out.same_shape(&image));
//! ```

pub mod blur;
pub mod color_lut;
pub mod convolve;
pub mod dispatch;
mod error;
pub mod kernel;
pub mod lut;
pub mod parallel;
pub mod rank;
pub mod spec;
pub mod unsharp;

pub use dispatch::{FilterDispatcher, dispatch};
pub use error::{FilterError, FilterResult};
pub use kernel::{BuiltinKernel, KernelSpec};
pub use lut::{ColorLut3D, LutDims};
pub use parallel::ExecutionStrategy;
pub use spec::{BlurKind, BlurSpec, FilterSpec, ModeSpec, RankSpec, UnsharpSpec};

// Re-export commonly used functions
pub use blur::{box_blur, gaussian_blur};
pub use color_lut::apply_lut;
pub use convolve::convolve;
pub use rank::{max_filter, median_filter, min_filter, mode_filter, rank_filter};
pub use unsharp::unsharp_mask;
