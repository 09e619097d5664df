//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use pixkit_core::PixelBuffer;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and fail on mismatch (default)
    #[default]
    Compare,
    /// Display mode - report mismatches without failing
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognised means compare.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Reads the mode from `REGTEST_MODE` and installs a test logger so
    /// `RUST_LOG` controls library log output.
    pub fn new(test_name: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mode = RegTestMode::from_env();
        log::info!("{test_name}_reg: mode {mode:?}");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{msg}");
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Returns
    ///
    /// `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.record_failure(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two buffers for exact equality of shape and samples
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.compare_buffers_within(buf1, buf2, 0.0)
    }

    /// Compare two buffers, allowing each sample to differ by `delta`
    pub fn compare_buffers_within(
        &mut self,
        buf1: &PixelBuffer,
        buf2: &PixelBuffer,
        delta: f32,
    ) -> bool {
        self.index += 1;

        if !buf1.same_shape(buf2) {
            self.record_failure(format!(
                "Failure in {}_reg: buffer comparison for index {} - shape mismatch \
                 ({}x{} {} vs {}x{} {})",
                self.test_name,
                self.index,
                buf1.width(),
                buf1.height(),
                buf1.mode(),
                buf2.width(),
                buf2.height(),
                buf2.mode()
            ));
            return false;
        }

        let row_len = buf1.row_len();
        let mismatch = buf1
            .samples()
            .iter()
            .zip(buf2.samples())
            .position(|(a, b)| (a - b).abs() > delta);

        if let Some(pos) = mismatch {
            let pixel = pos / buf1.channels();
            self.record_failure(format!(
                "Failure in {}_reg: buffer comparison for index {} - sample mismatch \
                 at ({}, {}) channel {}: {} vs {} (delta {})",
                self.test_name,
                self.index,
                pixel % buf1.width() as usize,
                pos / row_len,
                pos % buf1.channels(),
                buf1.samples()[pos],
                buf2.samples()[pos],
                delta
            ));
            return false;
        }

        true
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed or the test runs in display mode.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
        }
        self.success || self.display()
    }

    /// Finish the test, turning recorded failures into an error.
    pub fn into_result(self) -> TestResult<()> {
        if self.success || self.display() {
            return Ok(());
        }
        Err(TestError::RegressionFailed {
            test_name: self.test_name,
            failures: self.failures.len(),
            first: self.failures.into_iter().next().unwrap_or_default(),
        })
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
