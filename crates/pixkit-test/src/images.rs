//! Deterministic synthetic test images
//!
//! The library does no file I/O, so regression tests build their inputs
//! here. Every builder is a pure function of its arguments.

use crate::TestResult;
use pixkit_core::{Mode, PixelBuffer};

/// Image with every pixel equal to `pixel`.
pub fn constant_image(width: u32, height: u32, mode: Mode, pixel: &[f32]) -> TestResult<PixelBuffer> {
    Ok(PixelBuffer::filled(width, height, mode, pixel)?)
}

/// 8-bit grayscale ramp: `(x * 255 / (width - 1))`, constant down columns.
pub fn gradient_gray(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let denom = width.saturating_sub(1).max(1);
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |x| (x * 255 / denom) as f32))
        .collect();
    Ok(PixelBuffer::from_samples(width, height, Mode::Gray, data)?)
}

/// RGB image with red ramping along x, green along y, blue fixed at 128.
pub fn gradient_rgb(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let dx = width.saturating_sub(1).max(1);
    let dy = height.saturating_sub(1).max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / dx) as f32);
            data.push((y * 255 / dy) as f32);
            data.push(128.0);
        }
    }
    Ok(PixelBuffer::from_samples(width, height, Mode::Rgb, data)?)
}

/// Grayscale checkerboard of `cell`-sized squares alternating `low`/`high`.
pub fn checkerboard(width: u32, height: u32, cell: u32, low: u8, high: u8) -> TestResult<PixelBuffer> {
    let cell = cell.max(1);
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if (x / cell + y / cell) % 2 == 0 {
                    f32::from(low)
                } else {
                    f32::from(high)
                }
            })
        })
        .collect();
    Ok(PixelBuffer::from_samples(width, height, Mode::Gray, data)?)
}

/// Grayscale image that is `low` left of column `edge` and `high` from it on.
pub fn step_edge_gray(width: u32, height: u32, edge: u32, low: u8, high: u8) -> TestResult<PixelBuffer> {
    let data = (0..height)
        .flat_map(|_| {
            (0..width).map(move |x| if x < edge { f32::from(low) } else { f32::from(high) })
        })
        .collect();
    Ok(PixelBuffer::from_samples(width, height, Mode::Gray, data)?)
}

/// Uniform 8-bit noise in the given mode, reproducible from `seed`.
///
/// Uses the Numerical Recipes LCG; quality is irrelevant here, only
/// determinism.
pub fn noise(width: u32, height: u32, mode: Mode, seed: u64) -> TestResult<PixelBuffer> {
    const A: u64 = 1664525;
    const C: u64 = 1013904223;
    let mut state = seed;
    let len = width as usize * height as usize * mode.channels();
    let data = (0..len)
        .map(|_| {
            state = state.wrapping_mul(A).wrapping_add(C);
            ((state >> 33) % 256) as f32
        })
        .collect();
    Ok(PixelBuffer::from_samples(width, height, mode, data)?)
}

/// Grayscale noise; shorthand for [`noise`] in [`Mode::Gray`].
pub fn noise_gray(width: u32, height: u32, seed: u64) -> TestResult<PixelBuffer> {
    noise(width, height, Mode::Gray, seed)
}
