//! Unsharp mask regression test
//!
//! Tests unsharp masking:
//!   (1) percent 0 and an unreachable threshold return the original
//!   (2) percent -100 reproduces the Gaussian blur
//!   (3) edges overshoot on both sides, flat regions are untouched
//!   (4) the threshold gates each sample independently

use pixkit_core::{Mode, PixelBuffer};
use pixkit_filter::{FilterError, UnsharpSpec, gaussian_blur, unsharp_mask};
use pixkit_test::{RegParams, constant_image, gradient_rgb, noise, step_edge_gray};

#[test]
fn unsharp_reg_identity_cases() {
    let mut rp = RegParams::new("unsharp_identity");

    let img = noise(16, 12, Mode::Rgb, 31).unwrap();
    rp.compare_buffers(&img, &unsharp_mask(&img, 2.0, 0.0, 0.0).unwrap());
    rp.compare_buffers(&img, &unsharp_mask(&img, 2.0, 500.0, 256.0).unwrap());
    rp.compare_buffers(&img, &unsharp_mask(&img, 0.0, 150.0, 0.0).unwrap());

    let flat = constant_image(9, 9, Mode::Gray, &[128.0]).unwrap();
    let d = UnsharpSpec::default();
    let out = unsharp_mask(&flat, d.radius(), d.percent(), d.threshold()).unwrap();
    rp.compare_buffers(&flat, &out);

    assert!(rp.cleanup(), "unsharp_identity regression test failed");
}

#[test]
fn unsharp_reg_negative_percent() {
    let mut rp = RegParams::new("unsharp_negative_percent");

    // orig + (orig - blurred) * -1 == blurred
    for img in [noise(14, 10, Mode::Rgba, 2).unwrap(), gradient_rgb(12, 12).unwrap()] {
        let blurred = gaussian_blur(&img, 1.5).unwrap();
        rp.compare_buffers(&blurred, &unsharp_mask(&img, 1.5, -100.0, 0.0).unwrap());
    }

    assert!(rp.cleanup(), "unsharp_negative_percent regression test failed");
}

#[test]
fn unsharp_reg_edge_overshoot() {
    let mut rp = RegParams::new("unsharp_edge_overshoot");

    let edge = step_edge_gray(30, 4, 15, 60, 180).unwrap();
    let out = unsharp_mask(&edge, 2.0, 150.0, 3.0).unwrap();
    let row = out.row(1);
    rp.compare_values(1.0, if row[14] < 60.0 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if row[15] > 180.0 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(60.0, f64::from(row[0]), 0.0);
    rp.compare_values(180.0, f64::from(row[29]), 0.0);
    // no sample leaves the 8-bit range
    let bounded = out.samples().iter().all(|&v| (0.0..=255.0).contains(&v));
    rp.compare_values(1.0, if bounded { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "unsharp_edge_overshoot regression test failed");
}

#[test]
fn unsharp_reg_threshold_gate() {
    let mut rp = RegParams::new("unsharp_threshold_gate");

    let img = noise(12, 12, Mode::Gray, 64).unwrap();
    let threshold = 20.0;
    let blurred = gaussian_blur(&img, 2.0).unwrap();
    let out = unsharp_mask(&img, 2.0, 100.0, threshold).unwrap();
    let mut gated_ok = true;
    for ((&o, &b), &r) in img.samples().iter().zip(blurred.samples()).zip(out.samples()) {
        let diff = o - b;
        let expected = if diff.abs() >= threshold {
            (o + diff).clamp(0.0, 255.0)
        } else {
            o
        };
        gated_ok &= r == expected;
    }
    rp.compare_values(1.0, if gated_ok { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "unsharp_threshold_gate regression test failed");
}

#[test]
fn unsharp_reg_errors() {
    let mut rp = RegParams::new("unsharp_errors");

    rp.compare_values(
        1.0,
        if matches!(UnsharpSpec::new(-1.0, 150.0, 3.0), Err(FilterError::InvalidSpec(_))) {
            1.0
        } else {
            0.0
        },
        0.0,
    );
    let palette = PixelBuffer::new(2, 2, Mode::Palette).unwrap();
    rp.compare_values(
        1.0,
        if matches!(
            unsharp_mask(&palette, 2.0, 150.0, 3.0),
            Err(FilterError::UnsupportedMode { .. })
        ) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "unsharp_errors regression test failed");
}
