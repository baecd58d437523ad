//! Final assembly of the π approximant from the last partial sum.
//!
//!   π ≈ 426880·√10005 / (13591409 + S[n−1])
//!
//! S[0] is zero and each later S[i] folds in the terms for indices 1..=i,
//! so the constant 13591409 in the denominator stands for the i = 0 term
//! `P[0]·(13591409 + 545140134·0)/Q[0]`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;
use tracing::debug;

use crate::constants::{LINEAR_BASE, NUMERATOR_FACTOR, SQRT_RADICAND};
use crate::error::PiError;
use crate::fixed::FixedPoint;
use crate::precision::Precision;
use crate::sequences::SSequence;

/// Assemble π from the last element of the S-sequence.
pub fn assemble_pi(last_s: &BigRational, precision: Precision) -> Result<FixedPoint, PiError> {
    debug!(%precision, "Putting together the terms to calculate pi");

    let numerator = FixedPoint::sqrt_u64(SQRT_RADICAND, precision).mul_u64(NUMERATOR_FACTOR);

    let denominator = BigRational::from_integer(BigInt::from(LINEAR_BASE)) + last_s;
    if !denominator.is_positive() {
        return Err(PiError::Calculation(format!(
            "non-positive series denominator {denominator}"
        )));
    }
    let denominator = FixedPoint::from_rational(&denominator, precision);

    numerator.checked_div(&denominator)
}

/// Assemble π from a complete S-sequence.
pub fn assemble_from_sequence(s: &SSequence, precision: Precision) -> Result<FixedPoint, PiError> {
    let last = s
        .last()
        .ok_or_else(|| PiError::Calculation("empty S-sequence".into()))?;
    assemble_pi(last, precision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn single_term_approximation() {
        // 426880·√10005 / 13591409 = 3.14159265358973420...
        let precision = Precision::from_digits(40).unwrap();
        let pi = assemble_pi(&BigRational::zero(), precision).unwrap();
        assert!(pi.to_decimal_string(30).starts_with("3.1415926535897342"));
    }

    #[test]
    fn keeps_precision() {
        let precision = Precision::from_digits(25).unwrap();
        let pi = assemble_pi(&BigRational::zero(), precision).unwrap();
        assert_eq!(pi.precision(), precision);
    }

    #[test]
    fn non_positive_denominator_rejected() {
        let precision = Precision::from_digits(10).unwrap();
        let last = BigRational::from_integer(BigInt::from(-13_591_409));
        assert!(matches!(
            assemble_pi(&last, precision),
            Err(PiError::Calculation(_))
        ));
    }
}
