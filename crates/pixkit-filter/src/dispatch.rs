//! Filter dispatch
//!
//! Routes a [`FilterSpec`] to the engine that implements it.

use log::debug;
use pixkit_core::{ImageMetadata, PixelBuffer, RasterDecoder};

use crate::blur::{box_blur_with_strategy, gaussian_blur_with_strategy};
use crate::color_lut::apply_lut_with_strategy;
use crate::convolve::convolve_with_strategy;
use crate::parallel::ExecutionStrategy;
use crate::rank::{mode_filter_with_strategy, rank_filter_with_strategy};
use crate::spec::{BlurKind, FilterSpec};
use crate::unsharp::unsharp_mask_with_strategy;
use crate::FilterResult;

/// Applies filter specs to images
///
/// The dispatcher holds no state besides its execution strategy and can
/// be shared freely between threads.
///
/// # Examples
///
/// ```
/// use pixkit_core::{Mode, PixelBuffer};
/// use pixkit_filter::{BlurSpec, FilterDispatcher, FilterSpec, RankSpec};
///
/// let image = PixelBuffer::filled(8, 8, Mode::Gray, &[100.0]).unwrap();
/// let dispatcher = FilterDispatcher::new();
/// let out = dispatcher
///     .apply_all(
///         &image,
///         &[
///             FilterSpec::from(RankSpec::median(3).unwrap()),
///             FilterSpec::from(BlurSpec::gaussian(1.0).unwrap()),
///         ],
///     )
///     .unwrap();
/// assert_eq!(out, image);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterDispatcher {
    strategy: ExecutionStrategy,
}

impl FilterDispatcher {
    /// Create a dispatcher with the default (row-parallel) strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with the given strategy.
    pub fn with_strategy(strategy: ExecutionStrategy) -> Self {
        Self { strategy }
    }

    /// Execution strategy passed to every engine.
    #[inline]
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Apply one filter, returning a new image.
    pub fn apply(&self, image: &PixelBuffer, spec: &FilterSpec) -> FilterResult<PixelBuffer> {
        debug!(
            "{}: {}x{} {}",
            spec.name(),
            image.width(),
            image.height(),
            image.mode()
        );
        let s = self.strategy;
        match spec {
            FilterSpec::Kernel(kernel) => convolve_with_strategy(image, kernel, s),
            FilterSpec::Rank(rank) => {
                rank_filter_with_strategy(image, rank.window(), rank.rank(), s)
            }
            FilterSpec::Mode(mode) => mode_filter_with_strategy(image, mode.size(), s),
            FilterSpec::Blur(blur) => match blur.kind() {
                BlurKind::Gaussian => gaussian_blur_with_strategy(image, blur.radius(), s),
                BlurKind::Box => box_blur_with_strategy(image, blur.radius(), s),
            },
            FilterSpec::UnsharpMask(unsharp) => unsharp_mask_with_strategy(
                image,
                unsharp.radius(),
                unsharp.percent(),
                unsharp.threshold(),
                s,
            ),
            FilterSpec::ColorLut3D(lut) => apply_lut_with_strategy(image, lut, s),
        }
    }

    /// Apply filters in order, each to the previous result.
    ///
    /// Stops at the first failing filter; no partial result is returned.
    pub fn apply_all(
        &self,
        image: &PixelBuffer,
        specs: &[FilterSpec],
    ) -> FilterResult<PixelBuffer> {
        let mut current = image.clone();
        for spec in specs {
            current = self.apply(&current, spec)?;
        }
        Ok(current)
    }

    /// Decode `bytes` with `decoder` and filter the result.
    ///
    /// The decoder's metadata is returned alongside the filtered image.
    pub fn decode_and_apply(
        &self,
        decoder: &dyn RasterDecoder,
        bytes: &[u8],
        spec: &FilterSpec,
    ) -> FilterResult<(PixelBuffer, ImageMetadata)> {
        let decoded = decoder.decode(bytes)?;
        debug!(
            "decoded {} image, dpi {:?}",
            decoded.metadata.format, decoded.metadata.dpi
        );
        let filtered = self.apply(&decoded.buffer, spec)?;
        Ok((filtered, decoded.metadata))
    }
}

/// Apply one filter with the default dispatcher.
pub fn dispatch(image: &PixelBuffer, spec: &FilterSpec) -> FilterResult<PixelBuffer> {
    FilterDispatcher::new().apply(image, spec)
}
