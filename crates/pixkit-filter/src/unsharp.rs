//! Unsharp masking
//!
//! Sharpens by pushing each sample away from a Gaussian-blurred copy of
//! the image. Differences smaller than the threshold are left alone so
//! flat regions and fine noise are not amplified.

use log::trace;
use pixkit_core::PixelBuffer;

use crate::blur::gaussian_blur_with_strategy;
use crate::error::reject_palette;
use crate::parallel::{ExecutionStrategy, for_each_row};
use crate::spec::check_unsharp;
use crate::FilterResult;

/// Apply an unsharp mask.
///
/// With `blurred` the Gaussian blur of radius `radius` and
/// `diff = orig - blurred`, each sample becomes
/// `orig + diff * percent / 100` when `|diff| >= threshold`, and stays
/// `orig` otherwise.
///
/// # Errors
///
/// - [`FilterError::InvalidSpec`](crate::FilterError::InvalidSpec) for a
///   bad radius, a non-finite percent, or a negative threshold
/// - [`FilterError::UnsupportedMode`](crate::FilterError::UnsupportedMode)
///   for palette images
pub fn unsharp_mask(
    image: &PixelBuffer,
    radius: f32,
    percent: f32,
    threshold: f32,
) -> FilterResult<PixelBuffer> {
    unsharp_mask_with_strategy(
        image,
        radius,
        percent,
        threshold,
        ExecutionStrategy::default(),
    )
}

/// [`unsharp_mask`] with an explicit execution strategy.
pub fn unsharp_mask_with_strategy(
    image: &PixelBuffer,
    radius: f32,
    percent: f32,
    threshold: f32,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    check_unsharp(radius, percent, threshold)?;
    reject_palette(image, "UnsharpMask")?;
    trace!("UnsharpMask: radius {radius}, percent {percent}, threshold {threshold}");

    let blurred = gaussian_blur_with_strategy(image, radius, strategy)?;
    let mode = image.mode();
    let amount = percent / 100.0;

    let mut out = image.create_template(mode);
    let row_len = out.row_len();
    for_each_row(strategy, out.samples_mut(), row_len, |y, row| {
        let orig = image.row(y as u32);
        let blur = blurred.row(y as u32);
        for ((dst, &o), &b) in row.iter_mut().zip(orig).zip(blur) {
            let diff = o - b;
            *dst = if diff.abs() >= threshold {
                mode.clamp_sample(o + diff * amount)
            } else {
                o
            };
        }
    });

    Ok(out)
}
