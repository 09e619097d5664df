//! Raster decoder collaborator
//!
//! pixkit never parses encoded files. Anything that can turn bytes into a
//! [`PixelBuffer`] (a metafile renderer, a codec crate, a test fake) plugs in
//! through [`RasterDecoder`] and is handed to whoever needs it. There is no
//! global handler registry.

use crate::PixelBuffer;
use crate::error::Result;

/// Metadata reported by a decoder alongside the pixels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMetadata {
    /// Source format name as reported by the decoder (e.g. "WMF")
    pub format: String,
    /// Horizontal and vertical resolution in dots per inch, if known
    pub dpi: Option<(f32, f32)>,
}

impl ImageMetadata {
    /// Resolution rounded half up to whole dots per inch.
    pub fn dpi_rounded(&self) -> Option<(u32, u32)> {
        self.dpi
            .map(|(x, y)| ((x + 0.5).floor() as u32, (y + 0.5).floor() as u32))
    }
}

/// Pixels plus metadata produced by a decoder
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Decoded raster
    pub buffer: PixelBuffer,
    /// Decoder-reported metadata
    pub metadata: ImageMetadata,
}

/// Turns encoded bytes into a raster.
///
/// Implementations report failures as [`Error::Decode`](crate::Error::Decode).
pub trait RasterDecoder {
    /// Decode `bytes` into a raster and its metadata.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;
}

impl<D: RasterDecoder + ?Sized> RasterDecoder for &D {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        (**self).decode(bytes)
    }
}
