//! Three-dimensional color lookup tables
//!
//! A [`ColorLut3D`] samples a color transform on a regular grid over the
//! unit cube. Pixels are mapped by trilinear interpolation between the
//! eight grid nodes around them; the pixel work lives in
//! [`color_lut`](crate::color_lut).
//!
//! Table layout: channels vary fastest, then the red axis, then green,
//! then blue.

use pixkit_core::Mode;

use crate::{FilterError, FilterResult};

/// Smallest grid size per axis.
pub const LUT_MIN_SIZE: usize = 2;

/// Largest grid size per axis.
pub const LUT_MAX_SIZE: usize = 65;

/// Grid size of a lookup table, per axis (red, green, blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LutDims(pub [usize; 3]);

impl LutDims {
    /// Number of grid nodes.
    pub fn nodes(&self) -> usize {
        self.0.iter().product()
    }

    fn validate(&self) -> FilterResult<()> {
        for &dim in &self.0 {
            if !(LUT_MIN_SIZE..=LUT_MAX_SIZE).contains(&dim) {
                return Err(FilterError::InvalidSpec(format!(
                    "LUT size must be in [{LUT_MIN_SIZE}, {LUT_MAX_SIZE}], got {dim}"
                )));
            }
        }
        Ok(())
    }
}

impl From<usize> for LutDims {
    fn from(size: usize) -> Self {
        LutDims([size; 3])
    }
}

impl From<(usize, usize, usize)> for LutDims {
    fn from((r, g, b): (usize, usize, usize)) -> Self {
        LutDims([r, g, b])
    }
}

impl From<[usize; 3]> for LutDims {
    fn from(dims: [usize; 3]) -> Self {
        LutDims(dims)
    }
}

/// A validated 3D color lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLut3D {
    dims: LutDims,
    channels: usize,
    target_mode: Option<Mode>,
    table: Vec<f32>,
}

impl ColorLut3D {
    /// Create a table from flat values.
    ///
    /// `target_mode` selects the output mode; `None` keeps the input mode.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidSpec`] for a grid size outside `[2, 65]`,
    ///   a channel count other than 3 or 4, a table length other than
    ///   `channels * nodes`, a non-finite value, or a target mode that is
    ///   not `Rgb` or `Rgba`
    /// - [`FilterError::DimensionMismatch`] if the target mode has fewer
    ///   channels than the table
    pub fn new(
        dims: impl Into<LutDims>,
        table: impl Into<Vec<f32>>,
        channels: usize,
        target_mode: Option<Mode>,
    ) -> FilterResult<Self> {
        let dims = dims.into();
        dims.validate()?;
        if !(3..=4).contains(&channels) {
            return Err(FilterError::InvalidSpec(format!(
                "LUT channels must be 3 or 4, got {channels}"
            )));
        }
        if let Some(mode) = target_mode {
            if !matches!(mode, Mode::Rgb | Mode::Rgba) {
                return Err(FilterError::InvalidSpec(format!(
                    "LUT target mode must be RGB or RGBA, got {mode}"
                )));
            }
            if mode.channels() < channels {
                return Err(FilterError::DimensionMismatch {
                    table_channels: channels,
                    mode,
                });
            }
        }
        let table = table.into();
        let [d1, d2, d3] = dims.0;
        let expected = channels * dims.nodes();
        if table.len() != expected {
            return Err(FilterError::InvalidSpec(format!(
                "{d1}x{d2}x{d3} table with {channels} channels needs {expected} values, got {}",
                table.len()
            )));
        }
        if table.iter().any(|v| !v.is_finite()) {
            return Err(FilterError::InvalidSpec(
                "LUT values must be finite".to_string(),
            ));
        }
        Ok(Self {
            dims,
            channels,
            target_mode,
            table,
        })
    }

    /// Create a table from one entry per grid node.
    ///
    /// # Errors
    ///
    /// As [`ColorLut3D::new`], plus [`FilterError::InvalidSpec`] if an
    /// entry does not have exactly `channels` values.
    pub fn from_tuples<T: AsRef<[f32]>>(
        dims: impl Into<LutDims>,
        entries: &[T],
        channels: usize,
        target_mode: Option<Mode>,
    ) -> FilterResult<Self> {
        let mut table = Vec::with_capacity(entries.len() * channels);
        for entry in entries {
            let entry = entry.as_ref();
            if entry.len() != channels {
                return Err(FilterError::InvalidSpec(format!(
                    "LUT entries must have {channels} values, got {}",
                    entry.len()
                )));
            }
            table.extend_from_slice(entry);
        }
        Self::new(dims, table, channels, target_mode)
    }

    /// Build a table by sampling `callback(r, g, b)` at every grid node.
    ///
    /// Coordinates are `index / (size - 1)`, so both ends of each axis are
    /// sampled. Red varies fastest, then green, then blue.
    ///
    /// # Errors
    ///
    /// As [`ColorLut3D::from_tuples`].
    pub fn generate<F, T>(
        dims: impl Into<LutDims>,
        mut callback: F,
        channels: usize,
        target_mode: Option<Mode>,
    ) -> FilterResult<Self>
    where
        F: FnMut(f32, f32, f32) -> T,
        T: AsRef<[f32]>,
    {
        let dims = dims.into();
        dims.validate()?;
        let [d1, d2, d3] = dims.0;
        let axis = |i: usize, d: usize| i as f32 / (d - 1) as f32;
        let mut entries = Vec::with_capacity(dims.nodes());
        for b in 0..d3 {
            for g in 0..d2 {
                for r in 0..d1 {
                    entries.push(callback(axis(r, d1), axis(g, d2), axis(b, d3)));
                }
            }
        }
        Self::from_tuples(dims, &entries, channels, target_mode)
    }

    /// The identity transform on a `size`-node grid.
    pub fn identity(dims: impl Into<LutDims>) -> FilterResult<Self> {
        Self::generate(dims, |r, g, b| [r, g, b], 3, None)
    }

    /// Grid size per axis, red first.
    #[inline]
    pub fn dims(&self) -> LutDims {
        self.dims
    }

    /// Values per grid node (3 or 4).
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Output mode, if fixed at construction.
    #[inline]
    pub fn target_mode(&self) -> Option<Mode> {
        self.target_mode
    }

    /// Flat table values.
    #[inline]
    pub fn table(&self) -> &[f32] {
        &self.table
    }

    /// Table entry of grid node `(r, g, b)`.
    pub fn node(&self, r: usize, g: usize, b: usize) -> Option<&[f32]> {
        let [d1, d2, d3] = self.dims.0;
        if r >= d1 || g >= d2 || b >= d3 {
            return None;
        }
        let start = self.node_offset(r, g, b);
        Some(&self.table[start..start + self.channels])
    }

    #[inline]
    fn node_offset(&self, r: usize, g: usize, b: usize) -> usize {
        let [d1, d2, _] = self.dims.0;
        ((b * d2 + g) * d1 + r) * self.channels
    }

    /// Interpolate the table at unit-cube coordinates `(r, g, b)`.
    ///
    /// Writes `min(channels, out.len())` values to `out`. Coordinates are
    /// clamped to `[0, 1]`.
    pub fn interpolate(&self, r: f32, g: f32, b: f32, out: &mut [f32]) {
        let [d1, d2, d3] = self.dims.0;
        let (ri, rf) = lattice(r, d1);
        let (gi, gf) = lattice(g, d2);
        let (bi, bf) = lattice(b, d3);

        // corner offsets, named by (r, g, b) step
        let c000 = self.node_offset(ri, gi, bi);
        let c100 = self.node_offset(ri + 1, gi, bi);
        let c010 = self.node_offset(ri, gi + 1, bi);
        let c110 = self.node_offset(ri + 1, gi + 1, bi);
        let c001 = self.node_offset(ri, gi, bi + 1);
        let c101 = self.node_offset(ri + 1, gi, bi + 1);
        let c011 = self.node_offset(ri, gi + 1, bi + 1);
        let c111 = self.node_offset(ri + 1, gi + 1, bi + 1);

        let t = &self.table;
        for (k, value) in out.iter_mut().take(self.channels).enumerate() {
            let x00 = lerp(t[c000 + k], t[c100 + k], rf);
            let x10 = lerp(t[c010 + k], t[c110 + k], rf);
            let x01 = lerp(t[c001 + k], t[c101 + k], rf);
            let x11 = lerp(t[c011 + k], t[c111 + k], rf);
            let y0 = lerp(x00, x10, gf);
            let y1 = lerp(x01, x11, gf);
            *value = lerp(y0, y1, bf);
        }
    }
}

/// Lower grid index and fraction for coordinate `v` on a `dim`-node axis.
///
/// The index stops at `dim - 2` so the top of the axis is reached with
/// fraction 1.
#[inline]
fn lattice(v: f32, dim: usize) -> (usize, f32) {
    let pos = v.clamp(0.0, 1.0) * (dim - 1) as f32;
    let idx = (pos as usize).min(dim - 2);
    (idx, pos - idx as f32)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
