//! Border operations
//!
//! Neighbourhood filters pad their input by replicating edge pixels, filter
//! the padded copy, and never read outside it. These helpers build that
//! padded copy and strip a margin back off.

use super::PixelBuffer;
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Extend the image by replicating edge pixels.
    ///
    /// Adds `extend_x` columns on the left and right and `extend_y` rows on
    /// the top and bottom. Corner regions take the value of the nearest
    /// corner pixel. The palette, if any, is kept.
    ///
    /// # Returns
    ///
    /// New image with dimensions
    /// `(width + 2*extend_x, height + 2*extend_y)`.
    pub fn extend_by_replication(&self, extend_x: u32, extend_y: u32) -> Result<PixelBuffer> {
        if extend_x == 0 && extend_y == 0 {
            return Ok(self.clone());
        }
        let new_w = self
            .width
            .checked_add(extend_x.saturating_mul(2))
            .ok_or(Error::InvalidDimension {
                width: u32::MAX,
                height: self.height,
            })?;
        let new_h = self
            .height
            .checked_add(extend_y.saturating_mul(2))
            .ok_or(Error::InvalidDimension {
                width: self.width,
                height: u32::MAX,
            })?;

        let ch = self.channels();
        let mut data = Vec::with_capacity(new_w as usize * new_h as usize * ch);
        for y in 0..new_h {
            let sy = (i64::from(y) - i64::from(extend_y)).clamp(0, i64::from(self.height) - 1);
            let src = self.row(sy as u32);
            let first = &src[..ch];
            let last = &src[src.len() - ch..];
            for _ in 0..extend_x {
                data.extend_from_slice(first);
            }
            data.extend_from_slice(src);
            for _ in 0..extend_x {
                data.extend_from_slice(last);
            }
        }

        Ok(PixelBuffer {
            width: new_w,
            height: new_h,
            mode: self.mode,
            palette: self.palette.clone(),
            data,
        })
    }

    /// Remove a margin of `border_x` columns and `border_y` rows per side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if nothing would remain.
    pub fn remove_border(&self, border_x: u32, border_y: u32) -> Result<PixelBuffer> {
        let new_w = self.width.saturating_sub(border_x.saturating_mul(2));
        let new_h = self.height.saturating_sub(border_y.saturating_mul(2));
        if new_w == 0 || new_h == 0 {
            return Err(Error::InvalidDimension {
                width: new_w,
                height: new_h,
            });
        }
        let ch = self.channels();
        let start = border_x as usize * ch;
        let len = new_w as usize * ch;
        let mut data = Vec::with_capacity(len * new_h as usize);
        for y in border_y..border_y + new_h {
            data.extend_from_slice(&self.row(y)[start..start + len]);
        }
        Ok(PixelBuffer {
            width: new_w,
            height: new_h,
            mode: self.mode,
            palette: self.palette.clone(),
            data,
        })
    }
}
