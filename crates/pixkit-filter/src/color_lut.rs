//! Color lookup table application
//!
//! Maps every RGB(A) pixel through a [`ColorLut3D`] by trilinear
//! interpolation, optionally changing the image mode.

use log::trace;
use pixkit_core::{MAX_SAMPLE, Mode, PixelBuffer};

use crate::parallel::{ExecutionStrategy, for_each_row};
use crate::{ColorLut3D, FilterError, FilterResult};

/// Apply a 3D color lookup table.
///
/// The first three channels, scaled to `[0, 1]`, select the table
/// position. The output mode is the table's target mode, or the input
/// mode when the table has none. Output channels beyond the table's are
/// copied from the source, or set to 255 when the source has no such
/// channel.
///
/// # Errors
///
/// - [`FilterError::UnsupportedMode`] unless the input is `Rgb` or `Rgba`
/// - [`FilterError::DimensionMismatch`] if the output mode has fewer
///   channels than the table
pub fn apply_lut(image: &PixelBuffer, lut: &ColorLut3D) -> FilterResult<PixelBuffer> {
    apply_lut_with_strategy(image, lut, ExecutionStrategy::default())
}

/// [`apply_lut`] with an explicit execution strategy.
pub fn apply_lut_with_strategy(
    image: &PixelBuffer,
    lut: &ColorLut3D,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    let in_mode = image.mode();
    if !matches!(in_mode, Mode::Rgb | Mode::Rgba) {
        return Err(FilterError::UnsupportedMode {
            operation: "Color 3D LUT",
            mode: in_mode,
        });
    }
    let out_mode = lut.target_mode().unwrap_or(in_mode);
    let table_ch = lut.channels();
    if table_ch > out_mode.channels() {
        return Err(FilterError::DimensionMismatch {
            table_channels: table_ch,
            mode: out_mode,
        });
    }
    let [d1, d2, d3] = lut.dims().0;
    trace!("Color 3D LUT: {d1}x{d2}x{d3}, {table_ch} channels, {in_mode} -> {out_mode}");

    let w = image.width() as usize;
    let in_ch = in_mode.channels();
    let out_ch = out_mode.channels();

    let mut out = image.create_template(out_mode);
    let row_len = out.row_len();
    for_each_row(strategy, out.samples_mut(), row_len, |y, row| {
        let src = image.row(y as u32);
        let mut value = [0.0f32; 4];
        for x in 0..w {
            let px = &src[x * in_ch..(x + 1) * in_ch];
            lut.interpolate(
                px[0] / MAX_SAMPLE,
                px[1] / MAX_SAMPLE,
                px[2] / MAX_SAMPLE,
                &mut value[..table_ch],
            );
            let dst = &mut row[x * out_ch..(x + 1) * out_ch];
            for (k, sample) in dst.iter_mut().enumerate() {
                *sample = if k < table_ch {
                    out_mode.clamp_sample(value[k] * MAX_SAMPLE)
                } else if k < in_ch {
                    px[k]
                } else {
                    MAX_SAMPLE
                };
            }
        }
    });

    Ok(out)
}
