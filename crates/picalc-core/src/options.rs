//! Calculation options and configuration.

use crate::constants::{DEFAULT_DIGITS, DEFAULT_ITERATIONS};
use crate::error::PiError;
use crate::precision::Precision;
use crate::sequences::validate_iterations;

/// Options for a π calculation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Number of Chudnovsky iterations (at least 1).
    pub iterations: u64,
    /// Precision budget in decimal digits (at least 1).
    pub digits: u64,
    /// Whether to show verbose output.
    pub verbose: bool,
    /// Whether to show detailed output.
    pub details: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            digits: DEFAULT_DIGITS,
            verbose: false,
            details: false,
        }
    }
}

impl Options {
    /// Check the iteration count and derive the working precision.
    ///
    /// Invalid values are reported rather than replaced with defaults.
    pub fn validate(&self) -> Result<Precision, PiError> {
        validate_iterations(self.iterations)?;
        Precision::from_digits(self.digits)
    }
}
