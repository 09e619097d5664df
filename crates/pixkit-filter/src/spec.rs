//! Filter descriptions
//!
//! A [`FilterSpec`] is an immutable, validated description of one filter.
//! It carries parameters only; the pixel work happens in the engine
//! modules, reached through [`FilterDispatcher`](crate::FilterDispatcher).

use crate::kernel::{BuiltinKernel, KernelSpec};
use crate::lut::ColorLut3D;
use crate::{FilterError, FilterResult};

/// Largest accepted blur radius, in pixels.
pub const MAX_BLUR_RADIUS: f32 = 1.0e6;

/// Default Gaussian radius.
pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;

/// Default mode filter window.
pub const DEFAULT_MODE_SIZE: usize = 3;

/// One filter with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Weighted-sum convolution
    Kernel(KernelSpec),
    /// k-th smallest value in a square window
    Rank(RankSpec),
    /// Most frequent value in a square window
    Mode(ModeSpec),
    /// Gaussian or box blur
    Blur(BlurSpec),
    /// Threshold-gated sharpening against a Gaussian blur
    UnsharpMask(UnsharpSpec),
    /// Per-pixel color mapping through a 3D table
    ColorLut3D(ColorLut3D),
}

impl FilterSpec {
    /// Display name of the filter.
    pub fn name(&self) -> &'static str {
        match self {
            FilterSpec::Kernel(k) => k.name(),
            FilterSpec::Rank(r) => r.name(),
            FilterSpec::Mode(_) => "Mode",
            FilterSpec::Blur(b) => b.name(),
            FilterSpec::UnsharpMask(_) => "UnsharpMask",
            FilterSpec::ColorLut3D(_) => "Color 3D LUT",
        }
    }
}

impl From<KernelSpec> for FilterSpec {
    fn from(spec: KernelSpec) -> Self {
        FilterSpec::Kernel(spec)
    }
}

impl From<BuiltinKernel> for FilterSpec {
    fn from(builtin: BuiltinKernel) -> Self {
        FilterSpec::Kernel(builtin.kernel())
    }
}

impl From<RankSpec> for FilterSpec {
    fn from(spec: RankSpec) -> Self {
        FilterSpec::Rank(spec)
    }
}

impl From<ModeSpec> for FilterSpec {
    fn from(spec: ModeSpec) -> Self {
        FilterSpec::Mode(spec)
    }
}

impl From<BlurSpec> for FilterSpec {
    fn from(spec: BlurSpec) -> Self {
        FilterSpec::Blur(spec)
    }
}

impl From<UnsharpSpec> for FilterSpec {
    fn from(spec: UnsharpSpec) -> Self {
        FilterSpec::UnsharpMask(spec)
    }
}

impl From<ColorLut3D> for FilterSpec {
    fn from(spec: ColorLut3D) -> Self {
        FilterSpec::ColorLut3D(spec)
    }
}

/// Rank filter parameters
///
/// Picks the `rank`-th smallest of the `window * window` neighborhood
/// values, per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSpec {
    name: &'static str,
    window: usize,
    rank: usize,
}

impl RankSpec {
    /// Create a rank filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSpec`] if `window` is not a positive
    /// odd number or `rank >= window * window`.
    pub fn new(window: usize, rank: usize) -> FilterResult<Self> {
        check_rank(window, rank)?;
        Ok(Self {
            name: "Rank",
            window,
            rank,
        })
    }

    /// Median filter: rank `window * window / 2`.
    pub fn median(window: usize) -> FilterResult<Self> {
        let count = check_window(window)?;
        Ok(Self {
            name: "Median",
            window,
            rank: count / 2,
        })
    }

    /// Minimum filter: rank 0.
    pub fn min(window: usize) -> FilterResult<Self> {
        check_window(window)?;
        Ok(Self {
            name: "Min",
            window,
            rank: 0,
        })
    }

    /// Maximum filter: rank `window * window - 1`.
    pub fn max(window: usize) -> FilterResult<Self> {
        let count = check_window(window)?;
        Ok(Self {
            name: "Max",
            window,
            rank: count - 1,
        })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Mode filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSpec {
    size: usize,
}

impl ModeSpec {
    /// Create a mode filter over a `size * size` window.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSpec`] if `size` is not a positive odd
    /// number.
    pub fn new(size: usize) -> FilterResult<Self> {
        check_window(size)?;
        Ok(Self { size })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Default for ModeSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_MODE_SIZE,
        }
    }
}

/// Blur flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlurKind {
    /// Approximate Gaussian, built from three box passes per axis
    Gaussian,
    /// Box average; fractional radii weight the two edge pixels
    Box,
}

/// Blur parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurSpec {
    kind: BlurKind,
    radius: f32,
}

impl BlurSpec {
    /// Create a blur of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSpec`] if `radius` is negative, not
    /// finite, or above [`MAX_BLUR_RADIUS`].
    pub fn new(kind: BlurKind, radius: f32) -> FilterResult<Self> {
        check_radius(radius)?;
        Ok(Self { kind, radius })
    }

    /// Gaussian blur with standard deviation `radius`.
    pub fn gaussian(radius: f32) -> FilterResult<Self> {
        Self::new(BlurKind::Gaussian, radius)
    }

    /// Box blur extending `radius` pixels in each direction.
    pub fn box_blur(radius: f32) -> FilterResult<Self> {
        Self::new(BlurKind::Box, radius)
    }

    #[inline]
    pub fn kind(&self) -> BlurKind {
        self.kind
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            BlurKind::Gaussian => "GaussianBlur",
            BlurKind::Box => "BoxBlur",
        }
    }
}

impl Default for BlurSpec {
    fn default() -> Self {
        Self {
            kind: BlurKind::Gaussian,
            radius: DEFAULT_BLUR_RADIUS,
        }
    }
}

/// Unsharp mask parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnsharpSpec {
    radius: f32,
    percent: f32,
    threshold: f32,
}

impl UnsharpSpec {
    /// Create an unsharp mask.
    ///
    /// - `radius`: Gaussian radius of the reference blur
    /// - `percent`: strength of the sharpening, in percent
    /// - `threshold`: smallest difference from the blur that is sharpened
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSpec`] for a bad radius, a non-finite
    /// percent, or a negative or non-finite threshold.
    pub fn new(radius: f32, percent: f32, threshold: f32) -> FilterResult<Self> {
        check_unsharp(radius, percent, threshold)?;
        Ok(Self {
            radius,
            percent,
            threshold,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn percent(&self) -> f32 {
        self.percent
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for UnsharpSpec {
    fn default() -> Self {
        Self {
            radius: 2.0,
            percent: 150.0,
            threshold: 3.0,
        }
    }
}

/// Validate a square window size and return its sample count.
///
/// The count must fit in `usize` and the padding `window / 2` in `u32`.
pub(crate) fn check_window(window: usize) -> FilterResult<usize> {
    if window == 0 || window % 2 == 0 {
        return Err(FilterError::InvalidSpec(format!(
            "window size must be a positive odd number, got {window}"
        )));
    }
    window
        .checked_mul(window)
        .filter(|_| u32::try_from(window / 2).is_ok())
        .ok_or_else(|| FilterError::InvalidSpec(format!("window size {window} is too large")))
}

pub(crate) fn check_rank(window: usize, rank: usize) -> FilterResult<()> {
    let count = check_window(window)?;
    if rank >= count {
        return Err(FilterError::InvalidSpec(format!(
            "rank {rank} out of range for {count} window values"
        )));
    }
    Ok(())
}

pub(crate) fn check_radius(radius: f32) -> FilterResult<()> {
    if !radius.is_finite() || radius < 0.0 || radius > MAX_BLUR_RADIUS {
        return Err(FilterError::InvalidSpec(format!(
            "blur radius must be in [0, {MAX_BLUR_RADIUS}], got {radius}"
        )));
    }
    Ok(())
}

pub(crate) fn check_unsharp(radius: f32, percent: f32, threshold: f32) -> FilterResult<()> {
    check_radius(radius)?;
    if !percent.is_finite() {
        return Err(FilterError::InvalidSpec(format!(
            "unsharp percent must be finite, got {percent}"
        )));
    }
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(FilterError::InvalidSpec(format!(
            "unsharp threshold must be finite and non-negative, got {threshold}"
        )));
    }
    Ok(())
}
