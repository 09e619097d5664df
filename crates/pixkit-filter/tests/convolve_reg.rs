//! Convolution regression test
//!
//! Checks the convolution engine against a direct per-pixel evaluation
//! that reads out-of-range neighbors through `get_clamped`:
//!   (1) identity kernel is a no-op in every mode
//!   (2) every stock kernel matches the direct evaluation
//!   (3) output shape always equals input shape
//!   (4) malformed kernels and palette input are rejected

use pixkit_core::{Mode, PixelBuffer};
use pixkit_filter::{
    BuiltinKernel, ExecutionStrategy, FilterError, KernelSpec, convolve,
    convolve::convolve_with_strategy,
};
use pixkit_test::{RegParams, gradient_rgb, noise, noise_gray};

fn direct_convolve(img: &PixelBuffer, kernel: &KernelSpec) -> PixelBuffer {
    let (kw, kh) = kernel.size();
    let mode = img.mode();
    let mut out = img.create_template(mode);
    for y in 0..img.height() {
        for x in 0..img.width() {
            for c in 0..img.channels() {
                let mut sum = 0.0f32;
                for ky in 0..kh {
                    for kx in 0..kw {
                        let sx = x as i64 + kx as i64 - (kw / 2) as i64;
                        let sy = y as i64 + ky as i64 - (kh / 2) as i64;
                        sum += kernel.weight(kx, ky).unwrap() * img.get_clamped(sx, sy, c).unwrap();
                    }
                }
                let v = mode.clamp_sample(sum / kernel.scale() + kernel.offset());
                out.set(x, y, c, v).unwrap();
            }
        }
    }
    out
}

fn identity_kernel() -> KernelSpec {
    let mut w = [0.0f32; 9];
    w[4] = 1.0;
    KernelSpec::new((3, 3), w, None, 0.0).unwrap()
}

#[test]
fn convolve_reg_identity() {
    let mut rp = RegParams::new("convolve_identity");

    for mode in [Mode::Gray, Mode::Rgb, Mode::Rgba] {
        let img = noise(17, 11, mode, 7).unwrap();
        let out = convolve(&img, &identity_kernel()).unwrap();
        rp.compare_buffers(&img, &out);
    }

    let mut w = [0.0f32; 25];
    w[12] = 3.0;
    let k5 = KernelSpec::new((5, 5), w, None, 0.0).unwrap();
    let img = gradient_rgb(9, 6).unwrap();
    rp.compare_buffers(&img, &convolve(&img, &k5).unwrap());

    assert!(rp.cleanup(), "convolve_identity regression test failed");
}

#[test]
fn convolve_reg_builtins() {
    let mut rp = RegParams::new("convolve_builtins");

    let gray = noise_gray(23, 19, 42).unwrap();
    let rgba = noise(13, 9, Mode::Rgba, 3).unwrap();
    for builtin in BuiltinKernel::ALL {
        let kernel = builtin.kernel();
        for img in [&gray, &rgba] {
            let out = convolve(img, &kernel).unwrap();
            rp.compare_buffers(&direct_convolve(img, &kernel), &out);
        }
    }

    assert!(rp.cleanup(), "convolve_builtins regression test failed");
}

#[test]
fn convolve_reg_shape() {
    let mut rp = RegParams::new("convolve_shape");

    // images smaller than the kernel footprint still work
    for (w, h) in [(1, 1), (2, 1), (1, 5), (4, 4)] {
        let img = noise_gray(w, h, 11).unwrap();
        let out = convolve(&img, &BuiltinKernel::SmoothMore.kernel()).unwrap();
        rp.compare_values(w as f64, out.width() as f64, 0.0);
        rp.compare_values(h as f64, out.height() as f64, 0.0);
        rp.compare_buffers(&direct_convolve(&img, &BuiltinKernel::SmoothMore.kernel()), &out);
    }

    let float = PixelBuffer::from_samples(3, 2, Mode::GrayF32, vec![-1.5, 0.0, 2.5, 1e4, -3.0, 0.25])
        .unwrap();
    let out = convolve(&float, &BuiltinKernel::FindEdges.kernel()).unwrap();
    rp.compare_values(1.0, if out.mode() == Mode::GrayF32 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_buffers(&direct_convolve(&float, &BuiltinKernel::FindEdges.kernel()), &out);

    assert!(rp.cleanup(), "convolve_shape regression test failed");
}

#[test]
fn convolve_reg_strategies() {
    let mut rp = RegParams::new("convolve_strategies");

    let img = noise(31, 27, Mode::Rgb, 99).unwrap();
    for builtin in [BuiltinKernel::Sharpen, BuiltinKernel::Blur, BuiltinKernel::Emboss] {
        let kernel = builtin.kernel();
        let serial = convolve_with_strategy(&img, &kernel, ExecutionStrategy::Serial).unwrap();
        let parallel =
            convolve_with_strategy(&img, &kernel, ExecutionStrategy::ParallelRows).unwrap();
        rp.compare_buffers(&serial, &parallel);
    }

    assert!(rp.cleanup(), "convolve_strategies regression test failed");
}

#[test]
fn convolve_reg_errors() {
    let mut rp = RegParams::new("convolve_errors");

    let short = KernelSpec::new((3, 3), vec![1.0f32; 8], None, 0.0);
    rp.compare_values(
        1.0,
        if matches!(short, Err(FilterError::InvalidSpec(_))) { 1.0 } else { 0.0 },
        0.0,
    );

    let palette = PixelBuffer::new(4, 4, Mode::Palette).unwrap();
    let err = convolve(&palette, &identity_kernel());
    rp.compare_values(
        1.0,
        if matches!(err, Err(FilterError::UnsupportedMode { mode: Mode::Palette, .. })) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "convolve_errors regression test failed");
}
