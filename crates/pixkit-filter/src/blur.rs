//! Separable blurs
//!
//! Both blurs are built from one primitive: a running-sum box average
//! along a line, with fractional radii weighting the two pixels just
//! outside the integer window. A 2D blur runs the line pass over rows,
//! transposes, runs it over the former columns and transposes back.
//! Cost per pass is linear in the image size for any radius.
//!
//! The Gaussian blur is approximated by [`GAUSSIAN_PASSES`] box passes
//! per axis whose radius is chosen by [`gaussian_box_radius`].

use log::trace;
use pixkit_core::PixelBuffer;

use crate::error::reject_palette;
use crate::parallel::{ExecutionStrategy, for_each_row};
use crate::spec::check_radius;
use crate::FilterResult;

/// Box passes per axis used to approximate a Gaussian.
pub const GAUSSIAN_PASSES: u32 = 3;

/// Box blur with a (possibly fractional) radius.
///
/// For an integer radius this is the mean over the `(2r+1) x (2r+1)`
/// window. A radius of 0 returns a copy.
///
/// # Errors
///
/// - [`FilterError::InvalidSpec`](crate::FilterError::InvalidSpec) for a
///   negative or non-finite radius
/// - [`FilterError::UnsupportedMode`](crate::FilterError::UnsupportedMode)
///   for palette images
pub fn box_blur(image: &PixelBuffer, radius: f32) -> FilterResult<PixelBuffer> {
    box_blur_with_strategy(image, radius, ExecutionStrategy::default())
}

/// [`box_blur`] with an explicit execution strategy.
pub fn box_blur_with_strategy(
    image: &PixelBuffer,
    radius: f32,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    check_radius(radius)?;
    reject_palette(image, "BoxBlur")?;
    if radius == 0.0 {
        return Ok(image.clone());
    }
    trace!("BoxBlur: radius {radius}");
    Ok(separable_box(image, radius, 1, strategy))
}

/// Gaussian blur with standard deviation `radius`.
///
/// For radii of 1 and above, a blurred 8-bit step edge stays within 4
/// levels of an exact separable Gaussian. Smaller radii keep the right
/// variance but not the bell shape. A radius of 0 returns a copy.
///
/// # Errors
///
/// As [`box_blur`].
pub fn gaussian_blur(image: &PixelBuffer, radius: f32) -> FilterResult<PixelBuffer> {
    gaussian_blur_with_strategy(image, radius, ExecutionStrategy::default())
}

/// [`gaussian_blur`] with an explicit execution strategy.
pub fn gaussian_blur_with_strategy(
    image: &PixelBuffer,
    radius: f32,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    check_radius(radius)?;
    reject_palette(image, "GaussianBlur")?;
    if radius == 0.0 {
        return Ok(image.clone());
    }
    let box_radius = gaussian_box_radius(radius, GAUSSIAN_PASSES);
    trace!("GaussianBlur: sigma {radius}, {GAUSSIAN_PASSES} passes of box radius {box_radius}");
    Ok(separable_box(image, box_radius, GAUSSIAN_PASSES, strategy))
}

/// Fractional box radius whose `passes`-fold repetition has standard
/// deviation `sigma`.
///
/// A box of radius `l + a` (integer part `l`, edge weight `a`) has
/// variance `((2l+1)l(l+1) + 6a(l+1)^2) / (3(2l+1+2a))`; this solves
/// that for `a` at the target per-pass variance.
pub fn gaussian_box_radius(sigma: f32, passes: u32) -> f32 {
    let sigma2 = f64::from(sigma) * f64::from(sigma) / f64::from(passes);
    let ideal = (12.0 * sigma2 + 1.0).sqrt();
    let l = ((ideal - 1.0) / 2.0).floor();
    let a = (2.0 * l + 1.0) * (l * (l + 1.0) - 3.0 * sigma2)
        / (6.0 * (sigma2 - (l + 1.0) * (l + 1.0)));
    (l + a) as f32
}

fn separable_box(
    image: &PixelBuffer,
    radius: f32,
    passes: u32,
    strategy: ExecutionStrategy,
) -> PixelBuffer {
    let w = image.width() as usize;
    let h = image.height() as usize;
    let ch = image.channels();

    let mut data = image.samples().to_vec();
    for _ in 0..passes {
        data = line_pass(&data, w, ch, radius, strategy);
    }
    let mut data = transpose(&data, w, h, ch);
    for _ in 0..passes {
        data = line_pass(&data, h, ch, radius, strategy);
    }
    let data = transpose(&data, h, w, ch);

    let mode = image.mode();
    let mut out = image.create_template(mode);
    for (dst, &v) in out.samples_mut().iter_mut().zip(&data) {
        *dst = mode.clamp_sample(v);
    }
    out
}

/// Blur every `width`-pixel row of `src`.
fn line_pass(
    src: &[f32],
    width: usize,
    ch: usize,
    radius: f32,
    strategy: ExecutionStrategy,
) -> Vec<f32> {
    let row_len = width * ch;
    let mut dst = vec![0.0f32; src.len()];
    for_each_row(strategy, &mut dst, row_len, |y, row| {
        box_line(&src[y * row_len..(y + 1) * row_len], row, ch, radius);
    });
    dst
}

/// Box-average one line of interleaved samples with edge replication.
///
/// `out[x] = (sum(in[x-ri..=x+ri]) + f * (in[x-ri-1] + in[x+ri+1])) / (2r+1)`
/// with `ri = floor(r)` and `f = r - ri`.
fn box_line(src: &[f32], dst: &mut [f32], ch: usize, radius: f32) {
    let len = src.len() / ch;
    let last = len as isize - 1;
    let ri = radius.floor() as isize;
    let frac = f64::from(radius) - ri as f64;
    let norm = 1.0 / (2.0 * f64::from(radius) + 1.0);

    for c in 0..ch {
        let at = |i: isize| f64::from(src[i.clamp(0, last) as usize * ch + c]);

        // window sum at x = 0; indices past either end repeat the edge
        let direct = ri.min(last);
        let mut acc = ri as f64 * at(0);
        for i in 0..=direct {
            acc += at(i);
        }
        acc += (ri - direct) as f64 * at(last);

        for x in 0..=last {
            let outer = at(x - ri - 1) + at(x + ri + 1);
            dst[x as usize * ch + c] = ((acc + frac * outer) * norm) as f32;
            acc += at(x + ri + 1) - at(x - ri);
        }
    }
}

/// Swap rows and columns of a `width x height` interleaved image.
fn transpose(src: &[f32], width: usize, height: usize, ch: usize) -> Vec<f32> {
    let mut dst = vec![0.0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            let s = (y * width + x) * ch;
            let d = (x * height + y) * ch;
            dst[d..d + ch].copy_from_slice(&src[s..s + ch]);
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;
    use pixkit_core::Mode;

    fn line(src: &[f32], radius: f32) -> Vec<f32> {
        let mut dst = vec![0.0; src.len()];
        box_line(src, &mut dst, 1, radius);
        dst
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).abs() < 1e-4, "index {i}: {x} vs {y}");
        }
    }

    #[test]
    fn test_box_line_integer_radius() {
        let out = line(&[0.0, 0.0, 9.0, 0.0, 0.0], 1.0);
        assert_close(&out, &[0.0, 3.0, 3.0, 3.0, 0.0]);
    }

    #[test]
    fn test_box_line_edges_replicate() {
        let out = line(&[3.0, 6.0, 9.0], 1.0);
        assert_close(&out, &[4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_box_line_fractional() {
        // r = 0.5: (in[x] + 0.5 * (in[x-1] + in[x+1])) / 2
        let out = line(&[0.0, 8.0, 0.0, 0.0], 0.5);
        assert_close(&out, &[2.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_box_line_radius_exceeds_length() {
        // window covers everything plus replicated edges
        let out = line(&[0.0, 10.0], 3.0);
        // x=0: 3*0 + 0 + 10 + 2*10 = 30 over 7
        assert_close(&out, &[30.0 / 7.0, 40.0 / 7.0]);
    }

    #[test]
    fn test_box_line_interleaved() {
        let mut dst = vec![0.0; 6];
        box_line(&[0.0, 5.0, 9.0, 5.0, 0.0, 5.0], &mut dst, 2, 1.0);
        assert_close(&dst, &[3.0, 5.0, 3.0, 5.0, 3.0, 5.0]);
    }

    #[test]
    fn test_transpose() {
        let src = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t = transpose(&src, 3, 2, 1);
        assert_eq!(t, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(transpose(&t, 2, 3, 1), src.to_vec());
    }

    #[test]
    fn test_gaussian_box_radius() {
        // three passes of a radius-1 box have variance 3 * 2/3 = 2
        let r = gaussian_box_radius(2.0f32.sqrt(), 3);
        assert!((r - 1.0).abs() < 1e-4, "{r}");
        assert!(gaussian_box_radius(0.5, 3) > 0.0);
        assert!(gaussian_box_radius(10.0, 3) > gaussian_box_radius(5.0, 3));
    }

    #[test]
    fn test_box_blur_mean() {
        let mut data = vec![0.0; 9];
        data[4] = 90.0;
        let img = PixelBuffer::from_samples(3, 3, Mode::Gray, data).unwrap();
        let out = box_blur(&img, 1.0).unwrap();
        assert_eq!(out.get(1, 1, 0).unwrap(), 10.0);
    }

    #[test]
    fn test_radius_zero_is_copy() {
        let img = PixelBuffer::from_samples(2, 1, Mode::Gray, vec![1.0, 200.0]).unwrap();
        assert_eq!(box_blur(&img, 0.0).unwrap(), img);
        assert_eq!(gaussian_blur(&img, 0.0).unwrap(), img);
    }

    #[test]
    fn test_blur_validation() {
        let img = PixelBuffer::new(2, 2, Mode::Gray).unwrap();
        assert!(matches!(
            box_blur(&img, -1.0),
            Err(FilterError::InvalidSpec(_))
        ));
        let pal = PixelBuffer::new(2, 2, Mode::Palette).unwrap();
        assert!(matches!(
            gaussian_blur(&pal, 1.0),
            Err(FilterError::UnsupportedMode { .. })
        ));
    }

    #[test]
    fn test_strategies_agree() {
        let img = PixelBuffer::from_samples(
            6,
            4,
            Mode::Gray,
            (0..24).map(|v| ((v * 53) % 256) as f32).collect(),
        )
        .unwrap();
        let a = gaussian_blur_with_strategy(&img, 1.5, ExecutionStrategy::Serial).unwrap();
        let b = gaussian_blur_with_strategy(&img, 1.5, ExecutionStrategy::ParallelRows).unwrap();
        assert_eq!(a, b);
    }
}
