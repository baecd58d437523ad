//! Error type shared by the precalculation engine and its collaborators.

/// Error type for π calculations.
#[derive(Debug, thiserror::Error)]
pub enum PiError {
    /// A sequence buffer could not be reserved.
    #[error("failed to allocate memory for {0}")]
    Allocation(String),

    /// The iteration count is below the minimum of 1.
    #[error("invalid iteration count {0}: at least 1 iteration is required")]
    InvalidIterations(u64),

    /// The precision budget is zero decimal digits.
    #[error("invalid precision: {0} decimal digits requested, at least 1 is required")]
    InvalidPrecision(u64),

    /// A calculation precondition did not hold.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Calculation was cancelled.
    #[error("calculation cancelled")]
    Cancelled,

    /// Calculation timed out.
    #[error("calculation timed out after {0}")]
    Timeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_error_display() {
        let err = PiError::Allocation("P(1,n)".into());
        assert_eq!(err.to_string(), "failed to allocate memory for P(1,n)");

        let err = PiError::InvalidIterations(0);
        assert!(err.to_string().contains("at least 1 iteration"));

        let err = PiError::Cancelled;
        assert_eq!(err.to_string(), "calculation cancelled");
    }
}
