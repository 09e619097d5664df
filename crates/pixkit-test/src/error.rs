//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Building a synthetic test image failed
    #[error("failed to build test image: {0}")]
    ImageBuild(#[from] pixkit_core::Error),

    /// One or more comparisons failed
    #[error("{test_name}_reg: {failures} comparison(s) failed, first: {first}")]
    RegressionFailed {
        test_name: String,
        failures: usize,
        first: String,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
