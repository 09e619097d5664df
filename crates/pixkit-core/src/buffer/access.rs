//! Pixel access functions
//!
//! Bounds-checked getters and setters plus the edge-replicating accessor
//! used by neighbourhood filters.

use super::PixelBuffer;
use crate::error::{Error, Result};

impl PixelBuffer {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    fn check_coords(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels() {
            return Err(Error::ChannelOutOfBounds {
                channel,
                mode: self.mode,
            });
        }
        Ok(())
    }

    /// Check that `value` may be stored: legal for the mode and, when a
    /// palette is attached, a valid index into it.
    fn check_value(&self, value: f32) -> Result<()> {
        if !self.mode.accepts_sample(value) {
            return Err(Error::SampleOutOfRange {
                value,
                mode: self.mode,
            });
        }
        if let Some(palette) = &self.palette {
            let index = value as usize;
            if index >= palette.len() {
                return Err(Error::PaletteIndex {
                    index,
                    len: palette.len(),
                });
            }
        }
        Ok(())
    }

    /// Get one sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] or [`Error::ChannelOutOfBounds`].
    pub fn get(&self, x: u32, y: u32, channel: usize) -> Result<f32> {
        self.check_coords(x, y)?;
        self.check_channel(channel)?;
        Ok(self.data[self.offset(x, y) + channel])
    }

    /// Get all samples of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Result<&[f32]> {
        self.check_coords(x, y)?;
        let start = self.offset(x, y);
        Ok(&self.data[start..start + self.channels()])
    }

    /// Set one sample at (x, y).
    ///
    /// # Errors
    ///
    /// Besides coordinate and channel checks, returns
    /// [`Error::SampleOutOfRange`] if `value` is not legal for the mode and
    /// [`Error::PaletteIndex`] if it is past the end of the attached palette.
    pub fn set(&mut self, x: u32, y: u32, channel: usize, value: f32) -> Result<()> {
        self.check_coords(x, y)?;
        self.check_channel(channel)?;
        self.check_value(value)?;
        let idx = self.offset(x, y) + channel;
        self.data[idx] = value;
        Ok(())
    }

    /// Set all samples of the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[f32]) -> Result<()> {
        self.check_coords(x, y)?;
        if pixel.len() != self.channels() {
            return Err(Error::BufferLength {
                expected: self.channels(),
                actual: pixel.len(),
            });
        }
        for &value in pixel {
            self.check_value(value)?;
        }
        let start = self.offset(x, y);
        self.data[start..start + pixel.len()].copy_from_slice(pixel);
        Ok(())
    }

    /// Get a sample with replicated borders.
    ///
    /// Coordinates outside the image are clamped to the nearest edge pixel,
    /// so only the channel can be out of range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfBounds`] if `channel >= channels()`.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64, channel: usize) -> Result<f32> {
        self.check_channel(channel)?;
        let cx = x.clamp(0, i64::from(self.width) - 1) as u32;
        let cy = y.clamp(0, i64::from(self.height) - 1) as u32;
        Ok(self.data[self.offset(cx, cy) + channel])
    }
}
