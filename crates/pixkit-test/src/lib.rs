//! pixkit-test - Regression test framework for pixkit
//!
//! This crate provides an index-counted regression test harness, plus
//! deterministic synthetic images to run filters on.
//!
//! # Usage
//!
//! ```
//! use pixkit_test::{RegParams, gradient_gray};
//!
//! let img = gradient_gray(8, 8).unwrap();
//! let mut rp = RegParams::new("example");
//! rp.compare_values(8.0, img.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: "compare" (default) or "display"
//! - `RUST_LOG`: log filter for library output during tests

mod error;
mod images;
mod params;

pub use error::{TestError, TestResult};
pub use images::{
    checkerboard, constant_image, gradient_gray, gradient_rgb, noise, noise_gray, step_edge_gray,
};
pub use params::{RegParams, RegTestMode};
