//! Pixel encodings
//!
//! A [`Mode`] fixes the channel layout of a [`PixelBuffer`](crate::PixelBuffer)
//! and the numeric range of its samples.

use std::fmt;

/// Largest sample value of the integer modes.
pub const MAX_SAMPLE: f32 = 255.0;

/// Pixel encoding of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 8-bit grayscale ("L")
    Gray,
    /// 32-bit floating point grayscale ("F")
    GrayF32,
    /// 8-bit RGB ("RGB")
    Rgb,
    /// 8-bit RGB with alpha ("RGBA")
    Rgba,
    /// 8-bit palette indices ("P")
    Palette,
}

impl Mode {
    /// Number of samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Mode::Gray | Mode::GrayF32 | Mode::Palette => 1,
            Mode::Rgb => 3,
            Mode::Rgba => 4,
        }
    }

    /// Whether samples are indices into a palette.
    #[inline]
    pub fn is_palette(self) -> bool {
        self == Mode::Palette
    }

    /// Whether samples are unbounded floats rather than 0..=255 integers.
    #[inline]
    pub fn is_float(self) -> bool {
        self == Mode::GrayF32
    }

    /// Short mode tag.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Gray => "L",
            Mode::GrayF32 => "F",
            Mode::Rgb => "RGB",
            Mode::Rgba => "RGBA",
            Mode::Palette => "P",
        }
    }

    /// Bring a computed value into the sample range of this mode.
    ///
    /// Integer modes round half away from zero and saturate to `0..=255`.
    /// Float mode passes finite values through, saturates infinities to
    /// `f32::MIN`/`f32::MAX` and maps NaN to 0 so the result is always finite.
    #[inline]
    pub fn clamp_sample(self, value: f32) -> f32 {
        if self.is_float() {
            if value.is_nan() {
                0.0
            } else {
                value.clamp(f32::MIN, f32::MAX)
            }
        } else {
            value.round().clamp(0.0, MAX_SAMPLE)
        }
    }

    /// Check whether `value` is a legal stored sample for this mode.
    pub fn accepts_sample(self, value: f32) -> bool {
        if self.is_float() {
            value.is_finite()
        } else {
            (0.0..=MAX_SAMPLE).contains(&value) && value.fract() == 0.0
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
