//! Convolution operations
//!
//! Applies a [`KernelSpec`] to every channel of an image. The input is
//! first padded by replicating its edge pixels, so the output always has
//! the input's size.

use log::trace;
use pixkit_core::PixelBuffer;

use crate::error::reject_palette;
use crate::parallel::{ExecutionStrategy, for_each_row};
use crate::{FilterResult, KernelSpec};

/// Convolve an image with a kernel.
///
/// Each output sample is `sum(weight * neighbor) / scale + offset`,
/// rounded and saturated for integer modes. The kernel is not flipped:
/// weight `(kx, ky)` multiplies the neighbor at offset
/// `(kx - width / 2, ky - height / 2)`.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedMode`](crate::FilterError::UnsupportedMode)
/// for palette images.
pub fn convolve(image: &PixelBuffer, kernel: &KernelSpec) -> FilterResult<PixelBuffer> {
    convolve_with_strategy(image, kernel, ExecutionStrategy::default())
}

/// [`convolve`] with an explicit execution strategy.
pub fn convolve_with_strategy(
    image: &PixelBuffer,
    kernel: &KernelSpec,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    reject_palette(image, kernel.name())?;

    let (kw, kh) = kernel.size();
    let (pad_x, pad_y) = (kw / 2, kh / 2);
    trace!(
        "{}: {}x{} kernel, padding {}x{}",
        kernel.name(),
        kw,
        kh,
        pad_x,
        pad_y
    );
    let padded = image.extend_by_replication(pad_x as u32, pad_y as u32)?;

    let mode = image.mode();
    let ch = image.channels();
    let w = image.width() as usize;
    let pw = padded.width() as usize;
    let src = padded.samples();
    let weights = kernel.weights();
    let scale = kernel.scale();
    let offset = kernel.offset();

    let mut out = image.create_template(mode);
    let row_len = out.row_len();
    for_each_row(strategy, out.samples_mut(), row_len, |y, row| {
        for x in 0..w {
            for c in 0..ch {
                let mut sum = 0.0f32;
                for ky in 0..kh {
                    // padded (x, y + ky) is the top-left of this kernel row
                    let base = ((y + ky) * pw + x) * ch + c;
                    let krow = &weights[ky * kw..(ky + 1) * kw];
                    for (kx, &weight) in krow.iter().enumerate() {
                        sum += weight * src[base + kx * ch];
                    }
                }
                row[x * ch + c] = mode.clamp_sample(sum / scale + offset);
            }
        }
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinKernel, FilterError};
    use pixkit_core::Mode;

    fn identity() -> KernelSpec {
        let mut w = [0.0f32; 9];
        w[4] = 1.0;
        KernelSpec::new((3, 3), w, None, 0.0).unwrap()
    }

    fn gray(w: u32, h: u32, data: Vec<f32>) -> PixelBuffer {
        PixelBuffer::from_samples(w, h, Mode::Gray, data).unwrap()
    }

    #[test]
    fn test_identity_kernel() {
        let img = gray(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let out = convolve(&img, &identity()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_box_kernel_on_impulse() {
        let mut data = vec![0.0; 25];
        data[12] = 90.0;
        let img = gray(5, 5, data);
        let k = KernelSpec::new((3, 3), [1.0f32; 9], None, 0.0).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert_eq!(out.get(2, 2, 0).unwrap(), 10.0);
        assert_eq!(out.get(1, 1, 0).unwrap(), 10.0);
        assert_eq!(out.get(0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_kernel_is_not_flipped() {
        // weight at top-left reads the upper-left neighbor
        let mut w = [0.0f32; 9];
        w[0] = 1.0;
        let k = KernelSpec::new((3, 3), w, None, 0.0).unwrap();
        let img = gray(3, 3, (0..9).map(|v| v as f32 * 10.0).collect());
        let out = convolve(&img, &k).unwrap();
        assert_eq!(out.get(2, 2, 0).unwrap(), 40.0);
        assert_eq!(out.get(1, 1, 0).unwrap(), 0.0);
        // edge replication at the corner
        assert_eq!(out.get(0, 0, 0).unwrap(), 0.0);
        assert_eq!(out.get(2, 0, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_offset_and_saturation() {
        let img = gray(3, 3, vec![100.0; 9]);
        let out = convolve(&img, &BuiltinKernel::Contour.kernel()).unwrap();
        // flat input: weights sum to 0, offset 255
        assert!(out.samples().iter().all(|&v| v == 255.0));

        let out = convolve(&img, &BuiltinKernel::Emboss.kernel()).unwrap();
        assert!(out.samples().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_float_mode_not_clamped() {
        let img = PixelBuffer::filled(3, 3, Mode::GrayF32, &[1000.0]).unwrap();
        let k = KernelSpec::new((3, 3), [1.0f32; 9], Some(3.0), -5.0).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert_eq!(out.get(1, 1, 0).unwrap(), 2995.0);
    }

    #[test]
    fn test_float_overflow_saturates() {
        let img = PixelBuffer::filled(3, 3, Mode::GrayF32, &[f32::MAX]).unwrap();
        let k = KernelSpec::new((3, 3), [1.0f32; 9], Some(1.0), 0.0).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert!(out.samples().iter().all(|&v| v == f32::MAX));
        assert_eq!(out.validate(), Ok(()));

        let img = PixelBuffer::filled(3, 3, Mode::GrayF32, &[f32::MIN]).unwrap();
        let out = convolve(&img, &k).unwrap();
        assert!(out.samples().iter().all(|&v| v == f32::MIN));
    }

    #[test]
    fn test_rgba_all_channels() {
        let img = PixelBuffer::filled(4, 4, Mode::Rgba, &[10.0, 20.0, 30.0, 40.0]).unwrap();
        let out = convolve(&img, &BuiltinKernel::Smooth.kernel()).unwrap();
        assert_eq!(out.pixel(2, 2).unwrap(), &[10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_palette_rejected() {
        let img = PixelBuffer::new(2, 2, Mode::Palette).unwrap();
        let err = convolve(&img, &identity()).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedMode { .. }));
    }

    #[test]
    fn test_serial_matches_parallel() {
        let img = gray(7, 5, (0..35).map(|v| ((v * 37) % 256) as f32).collect());
        let k = BuiltinKernel::SmoothMore.kernel();
        let a = convolve_with_strategy(&img, &k, ExecutionStrategy::Serial).unwrap();
        let b = convolve_with_strategy(&img, &k, ExecutionStrategy::ParallelRows).unwrap();
        assert_eq!(a, b);
    }
}
