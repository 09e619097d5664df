//! Convolution kernels
//!
//! A [`KernelSpec`] is a 3x3 or 5x5 weight matrix in row-major order,
//! together with the divisor and bias applied to each weighted sum.
//! [`BuiltinKernel`] names the stock kernels.

use crate::{FilterError, FilterResult};

/// Kernel sizes accepted by [`KernelSpec::new`].
pub const KERNEL_SIZES: [(usize, usize); 2] = [(3, 3), (5, 5)];

/// A validated convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSpec {
    /// Display name
    name: &'static str,
    /// Width of the kernel
    width: usize,
    /// Height of the kernel
    height: usize,
    /// Kernel weights (row-major order)
    weights: Vec<f32>,
    /// Divisor applied to each weighted sum
    scale: f32,
    /// Bias added after scaling
    offset: f32,
}

impl KernelSpec {
    /// Create a kernel from its size and weights.
    ///
    /// `scale` defaults to the sum of the weights when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidSpec`] if the size is not 3x3 or 5x5,
    /// the weight count differs from `width * height`, a value is not
    /// finite, or the scale is (or defaults to) zero.
    pub fn new(
        size: (usize, usize),
        weights: impl Into<Vec<f32>>,
        scale: Option<f32>,
        offset: f32,
    ) -> FilterResult<Self> {
        let (width, height) = size;
        if !KERNEL_SIZES.contains(&size) {
            return Err(FilterError::InvalidSpec(format!(
                "kernel size must be 3x3 or 5x5, got {width}x{height}"
            )));
        }
        let weights = weights.into();
        if weights.len() != width * height {
            return Err(FilterError::InvalidSpec(format!(
                "{width}x{height} kernel needs {} weights, got {}",
                width * height,
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(FilterError::InvalidSpec(
                "kernel weights must be finite".to_string(),
            ));
        }
        if !offset.is_finite() {
            return Err(FilterError::InvalidSpec(format!(
                "kernel offset must be finite, got {offset}"
            )));
        }
        let scale = scale.unwrap_or_else(|| weights.iter().sum());
        if scale == 0.0 || !scale.is_finite() {
            return Err(FilterError::InvalidSpec(format!(
                "kernel scale must be finite and non-zero, got {scale}"
            )));
        }
        Ok(Self {
            name: "Kernel",
            width,
            height,
            weights,
            scale,
            offset,
        })
    }

    /// One of the stock kernels.
    pub fn builtin(kernel: BuiltinKernel) -> Self {
        kernel.kernel()
    }

    /// Display name of the kernel.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kernel size as `(width, height)`.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Weights in row-major order.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Divisor applied to each weighted sum.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Bias added after scaling.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Get a weight by kernel coordinates.
    pub fn weight(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.weights[y * self.width + x])
        } else {
            None
        }
    }
}

/// Stock convolution kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKernel {
    Blur,
    Contour,
    Detail,
    EdgeEnhance,
    EdgeEnhanceMore,
    Emboss,
    FindEdges,
    Sharpen,
    Smooth,
    SmoothMore,
}

impl BuiltinKernel {
    /// Every stock kernel.
    pub const ALL: [BuiltinKernel; 10] = [
        BuiltinKernel::Blur,
        BuiltinKernel::Contour,
        BuiltinKernel::Detail,
        BuiltinKernel::EdgeEnhance,
        BuiltinKernel::EdgeEnhanceMore,
        BuiltinKernel::Emboss,
        BuiltinKernel::FindEdges,
        BuiltinKernel::Sharpen,
        BuiltinKernel::Smooth,
        BuiltinKernel::SmoothMore,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinKernel::Blur => "Blur",
            BuiltinKernel::Contour => "Contour",
            BuiltinKernel::Detail => "Detail",
            BuiltinKernel::EdgeEnhance => "Edge-enhance",
            BuiltinKernel::EdgeEnhanceMore => "Edge-enhance More",
            BuiltinKernel::Emboss => "Emboss",
            BuiltinKernel::FindEdges => "Find Edges",
            BuiltinKernel::Sharpen => "Sharpen",
            BuiltinKernel::Smooth => "Smooth",
            BuiltinKernel::SmoothMore => "Smooth More",
        }
    }

    /// Build the kernel.
    pub fn kernel(self) -> KernelSpec {
        #[rustfmt::skip]
        let (size, scale, offset, weights): (usize, f32, f32, &[f32]) = match self {
            BuiltinKernel::Blur => (5, 16.0, 0.0, &[
                1.0, 1.0, 1.0, 1.0, 1.0,
                1.0, 0.0, 0.0, 0.0, 1.0,
                1.0, 0.0, 0.0, 0.0, 1.0,
                1.0, 0.0, 0.0, 0.0, 1.0,
                1.0, 1.0, 1.0, 1.0, 1.0,
            ]),
            BuiltinKernel::Contour => (3, 1.0, 255.0, &[
                -1.0, -1.0, -1.0,
                -1.0,  8.0, -1.0,
                -1.0, -1.0, -1.0,
            ]),
            BuiltinKernel::Detail => (3, 6.0, 0.0, &[
                 0.0, -1.0,  0.0,
                -1.0, 10.0, -1.0,
                 0.0, -1.0,  0.0,
            ]),
            BuiltinKernel::EdgeEnhance => (3, 2.0, 0.0, &[
                -1.0, -1.0, -1.0,
                -1.0, 10.0, -1.0,
                -1.0, -1.0, -1.0,
            ]),
            BuiltinKernel::EdgeEnhanceMore => (3, 1.0, 0.0, &[
                -1.0, -1.0, -1.0,
                -1.0,  9.0, -1.0,
                -1.0, -1.0, -1.0,
            ]),
            BuiltinKernel::Emboss => (3, 1.0, 128.0, &[
                -1.0, 0.0, 0.0,
                 0.0, 1.0, 0.0,
                 0.0, 0.0, 0.0,
            ]),
            BuiltinKernel::FindEdges => (3, 1.0, 0.0, &[
                -1.0, -1.0, -1.0,
                -1.0,  8.0, -1.0,
                -1.0, -1.0, -1.0,
            ]),
            BuiltinKernel::Sharpen => (3, 16.0, 0.0, &[
                -2.0, -2.0, -2.0,
                -2.0, 32.0, -2.0,
                -2.0, -2.0, -2.0,
            ]),
            BuiltinKernel::Smooth => (3, 13.0, 0.0, &[
                1.0, 1.0, 1.0,
                1.0, 5.0, 1.0,
                1.0, 1.0, 1.0,
            ]),
            BuiltinKernel::SmoothMore => (5, 100.0, 0.0, &[
                1.0, 1.0,  1.0, 1.0, 1.0,
                1.0, 5.0,  5.0, 5.0, 1.0,
                1.0, 5.0, 44.0, 5.0, 1.0,
                1.0, 5.0,  5.0, 5.0, 1.0,
                1.0, 1.0,  1.0, 1.0, 1.0,
            ]),
        };
        // Stock tables are well-formed, so validation is skipped.
        KernelSpec {
            name: self.name(),
            width: size,
            height: size,
            weights: weights.to_vec(),
            scale,
            offset,
        }
    }
}

impl From<BuiltinKernel> for KernelSpec {
    fn from(builtin: BuiltinKernel) -> Self {
        builtin.kernel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_default_scale() {
        let k = KernelSpec::new((3, 3), vec![1.0f32; 9], None, 0.0).unwrap();
        assert_eq!(k.scale(), 9.0);
        assert_eq!(k.offset(), 0.0);
        assert_eq!(k.size(), (3, 3));
        assert_eq!(k.weight(2, 2), Some(1.0));
        assert_eq!(k.weight(3, 0), None);
    }

    #[test]
    fn test_new_rejects_short_weights() {
        let err = KernelSpec::new((3, 3), vec![1.0f32; 8], None, 0.0).unwrap_err();
        assert!(matches!(err, FilterError::InvalidSpec(_)));
    }

    #[test]
    fn test_new_rejects_bad_size() {
        assert!(KernelSpec::new((4, 4), vec![1.0f32; 16], None, 0.0).is_err());
        assert!(KernelSpec::new((3, 5), vec![1.0f32; 15], None, 0.0).is_err());
        assert!(KernelSpec::new((5, 5), vec![1.0f32; 25], None, 0.0).is_ok());
    }

    #[test]
    fn test_new_rejects_zero_scale() {
        // weights sum to zero with no explicit scale
        let edge: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];
        assert!(KernelSpec::new((3, 3), edge, None, 0.0).is_err());
        assert!(KernelSpec::new((3, 3), edge, Some(0.0), 0.0).is_err());
        assert!(KernelSpec::new((3, 3), edge, Some(1.0), 0.0).is_ok());
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let mut w = vec![1.0f32; 9];
        w[4] = f32::NAN;
        assert!(KernelSpec::new((3, 3), w, None, 0.0).is_err());
        assert!(KernelSpec::new((3, 3), vec![1.0f32; 9], None, f32::INFINITY).is_err());
    }

    #[test]
    fn test_builtins_pass_validation() {
        for builtin in BuiltinKernel::ALL {
            let k = builtin.kernel();
            let rebuilt =
                KernelSpec::new(k.size(), k.weights(), Some(k.scale()), k.offset()).unwrap();
            assert_eq!(rebuilt.weights(), k.weights(), "{}", builtin.name());
            assert_eq!(k.name(), builtin.name());
        }
    }

    #[test]
    fn test_builtin_tables() {
        let smooth_more = BuiltinKernel::SmoothMore.kernel();
        assert_eq!(smooth_more.size(), (5, 5));
        assert_eq!(smooth_more.weight(2, 2), Some(44.0));
        assert_eq!(smooth_more.weights().iter().sum::<f32>(), 100.0);

        let contour = BuiltinKernel::Contour.kernel();
        assert_eq!(contour.offset(), 255.0);

        let emboss = BuiltinKernel::Emboss.kernel();
        assert_eq!(emboss.offset(), 128.0);
        assert_eq!(emboss.weight(0, 0), Some(-1.0));
    }
}
