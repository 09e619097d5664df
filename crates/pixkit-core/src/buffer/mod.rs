//! PixelBuffer - The image container
//!
//! A `PixelBuffer` owns a rectangular grid of pixels with a fixed channel
//! layout given by its [`Mode`].
//!
//! # Sample layout
//!
//! - Samples are stored row-major as interleaved `C`-tuples
//! - `samples().len() == width * height * channels` always holds
//! - Every mode stores `f32`; integer modes hold integral values in `0..=255`
//!
//! # Ownership model
//!
//! Buffers are plain owned values. Filters read a borrowed input and return a
//! freshly allocated output, so no buffer is ever mutated behind its owner's
//! back.

mod access;
mod border;

use crate::error::{Error, Result};
use crate::{Mode, Palette};

/// Rectangular image with a fixed channel layout
///
/// # Examples
///
/// ```
/// use pixkit_core::{Mode, PixelBuffer};
///
/// let buf = PixelBuffer::new(640, 480, Mode::Rgb).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.channels(), 3);
/// assert_eq!(buf.samples().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    mode: Mode,
    palette: Option<Palette>,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, mode: Mode) -> Result<Self> {
        let len = Self::sample_count(width, height, mode)?;
        Ok(Self {
            width,
            height,
            mode,
            palette: None,
            data: vec![0.0; len],
        })
    }

    /// Create a buffer with every pixel set to `pixel`.
    ///
    /// `pixel` must hold exactly `mode.channels()` legal samples.
    pub fn filled(width: u32, height: u32, mode: Mode, pixel: &[f32]) -> Result<Self> {
        if pixel.len() != mode.channels() {
            return Err(Error::BufferLength {
                expected: mode.channels(),
                actual: pixel.len(),
            });
        }
        check_samples(mode, pixel)?;
        let len = Self::sample_count(width, height, mode)?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            mode,
            palette: None,
            data,
        })
    }

    /// Wrap existing row-major samples.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferLength`] if `data.len() != width * height * channels`
    /// - [`Error::SampleOutOfRange`] if an integer-mode sample is not an
    ///   integer in `0..=255`, or a float sample is not finite
    pub fn from_samples(width: u32, height: u32, mode: Mode, data: Vec<f32>) -> Result<Self> {
        let expected = Self::sample_count(width, height, mode)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        check_samples(mode, &data)?;
        Ok(Self {
            width,
            height,
            mode,
            palette: None,
            data,
        })
    }

    /// Wrap 8-bit samples.
    pub fn from_bytes(width: u32, height: u32, mode: Mode, bytes: &[u8]) -> Result<Self> {
        let data = bytes.iter().map(|&b| f32::from(b)).collect();
        Self::from_samples(width, height, mode, data)
    }

    /// Create a zero-filled buffer with this buffer's dimensions in `mode`.
    ///
    /// The palette is carried over only when both modes are `Palette`.
    pub fn create_template(&self, mode: Mode) -> Self {
        let len = self.width as usize * self.height as usize * mode.channels();
        Self {
            width: self.width,
            height: self.height,
            mode,
            palette: if mode == self.mode {
                self.palette.clone()
            } else {
                None
            },
            data: vec![0.0; len],
        }
    }

    /// Attach a palette to a `Palette`-mode buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::PaletteNotAllowed`] for any other mode
    /// - [`Error::PaletteIndex`] if a stored index is outside the palette
    pub fn with_palette(mut self, palette: Palette) -> Result<Self> {
        if !self.mode.is_palette() {
            return Err(Error::PaletteNotAllowed(self.mode));
        }
        check_palette_indices(&palette, &self.data)?;
        self.palette = Some(palette);
        Ok(self)
    }

    /// Re-check every stored sample against the mode and the attached
    /// palette.
    ///
    /// Use this after writing through [`samples_mut`](Self::samples_mut),
    /// which does not validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleOutOfRange`] or [`Error::PaletteIndex`] for the
    /// first offending sample.
    pub fn validate(&self) -> Result<()> {
        check_samples(self.mode, &self.data)?;
        match &self.palette {
            Some(palette) => check_palette_indices(palette, &self.data),
            None => Ok(()),
        }
    }

    fn sample_count(width: u32, height: u32, mode: Mode) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(width as usize * height as usize * mode.channels())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel encoding.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.mode.channels()
    }

    /// Get the attached palette, if any.
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// All samples, row-major.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Mutable view of all samples. The length cannot change.
    ///
    /// Writes are not checked. Callers must store values that are legal for
    /// the mode (integral `0..=255`, or finite for `GrayF32`) and below the
    /// palette length; [`validate`](Self::validate) re-checks the buffer.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Check if two buffers have the same width, height, and mode.
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height && self.mode == other.mode
    }

    /// Export samples of an integer-mode buffer as bytes.
    ///
    /// Float buffers are rounded and saturated to `0..=255`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| v.round().clamp(0.0, 255.0) as u8)
            .collect()
    }
}

fn check_samples(mode: Mode, samples: &[f32]) -> Result<()> {
    match samples.iter().find(|&&v| !mode.accepts_sample(v)) {
        Some(&value) => Err(Error::SampleOutOfRange { value, mode }),
        None => Ok(()),
    }
}

fn check_palette_indices(palette: &Palette, samples: &[f32]) -> Result<()> {
    match samples.iter().max_by(|a, b| a.total_cmp(b)) {
        Some(&max) if max as usize >= palette.len() => Err(Error::PaletteIndex {
            index: max as usize,
            len: palette.len(),
        }),
        _ => Ok(()),
    }
}
