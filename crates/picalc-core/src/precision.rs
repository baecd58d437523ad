//! Precision budget shared by every fixed-point value of a run.

use std::fmt;

use serde::Serialize;

use crate::constants::{BITS_PER_DIGIT_DEN, BITS_PER_DIGIT_NUM};
use crate::error::PiError;

/// Working precision of a run.
///
/// Derived once from the requested decimal digit count before any arithmetic
/// begins, then passed explicitly to every `FixedPoint` constructor.
///
/// # Example
/// ```
/// use picalc_core::precision::Precision;
///
/// let precision = Precision::from_digits(100).unwrap();
/// assert_eq!(precision.bits(), 350);
/// assert_eq!(precision.digits(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Precision {
    digits: u64,
    bits: u64,
}

impl Precision {
    /// Derive a precision of `ceil(digits × 3.5)` bits.
    pub fn from_digits(digits: u64) -> Result<Self, PiError> {
        if digits == 0 {
            return Err(PiError::InvalidPrecision(digits));
        }
        let bits = digits
            .checked_mul(BITS_PER_DIGIT_NUM)
            .map(|b| b.div_ceil(BITS_PER_DIGIT_DEN))
            .ok_or_else(|| PiError::Config(format!("precision of {digits} digits overflows")))?;
        Ok(Self { digits, bits })
    }

    /// Number of fractional bits carried by fixed-point values.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Decimal digit count this precision was derived from.
    #[must_use]
    pub fn digits(&self) -> u64 {
        self.digits
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits ({} bits)", self.digits, self.bits)
    }
}
