//! Binary fixed-point numbers with an explicit precision.
//!
//! A `FixedPoint` stores `mantissa / 2^bits` where `bits` comes from the
//! run's `Precision`. Every constructor takes the precision as a parameter;
//! there is no process-wide default.

use std::f64::consts::LOG10_2;
use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::PiError;
use crate::precision::Precision;

/// An arbitrary-precision real value truncated to `precision.bits()` fractional bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint {
    mantissa: BigInt,
    precision: Precision,
}

impl FixedPoint {
    /// Zero at the given precision.
    #[must_use]
    pub fn zero(precision: Precision) -> Self {
        Self {
            mantissa: BigInt::zero(),
            precision,
        }
    }

    /// Exact conversion of an integer.
    #[must_use]
    pub fn from_integer(value: &BigInt, precision: Precision) -> Self {
        Self {
            mantissa: value << precision.bits(),
            precision,
        }
    }

    /// Exact conversion of a machine integer.
    #[must_use]
    pub fn from_u64(value: u64, precision: Precision) -> Self {
        Self::from_integer(&BigInt::from(value), precision)
    }

    /// Convert a rational, rounding toward negative infinity.
    #[must_use]
    pub fn from_rational(value: &BigRational, precision: Precision) -> Self {
        let scaled = value.numer() << precision.bits();
        Self {
            mantissa: scaled.div_floor(value.denom()),
            precision,
        }
    }

    /// Square root of a machine integer, truncated to the precision.
    ///
    /// # Example
    /// ```
    /// use picalc_core::fixed::FixedPoint;
    /// use picalc_core::precision::Precision;
    ///
    /// let precision = Precision::from_digits(30).unwrap();
    /// let root = FixedPoint::sqrt_u64(2, precision);
    /// assert!(root.to_decimal_string(20).starts_with("1.414213562373095048"));
    /// ```
    #[must_use]
    pub fn sqrt_u64(radicand: u64, precision: Precision) -> Self {
        // sqrt(r * 2^(2b)) = sqrt(r) * 2^b
        let scaled = BigUint::from(radicand) << (2 * precision.bits());
        Self {
            mantissa: BigInt::from_biguint(Sign::Plus, scaled.sqrt()),
            precision,
        }
    }

    /// Exact multiplication by a machine integer.
    #[must_use]
    pub fn mul_u64(&self, factor: u64) -> Self {
        Self {
            mantissa: &self.mantissa * factor,
            precision: self.precision,
        }
    }

    /// Divide by another value of the same precision, rounding toward
    /// negative infinity.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self, PiError> {
        if self.precision != divisor.precision {
            return Err(PiError::Calculation(format!(
                "precision mismatch: {} vs {}",
                self.precision, divisor.precision
            )));
        }
        if divisor.mantissa.is_zero() {
            return Err(PiError::Calculation("division by zero".into()));
        }
        let scaled = &self.mantissa << self.precision.bits();
        Ok(Self {
            mantissa: scaled.div_floor(&divisor.mantissa),
            precision: self.precision,
        })
    }

    /// The precision this value was built with.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The raw mantissa, i.e. the value scaled by `2^bits`.
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Whether the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Decimal significand and base-10 exponent.
    ///
    /// The significand holds at most `digits` digits with no decimal point
    /// and no trailing zeros, prefixed with `-` for negative values. The
    /// value equals `0.<significand> × 10^exponent`. Digits past `digits`
    /// are truncated, not rounded. Zero yields an empty significand and
    /// exponent 0.
    ///
    /// # Example
    /// ```
    /// use picalc_core::fixed::FixedPoint;
    /// use picalc_core::precision::Precision;
    ///
    /// let precision = Precision::from_digits(20).unwrap();
    /// let value = FixedPoint::from_u64(1234, precision);
    /// assert_eq!(value.to_decimal_parts(10), ("1234".to_string(), 4));
    /// ```
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn to_decimal_parts(&self, digits: usize) -> (String, i64) {
        if self.mantissa.is_zero() || digits == 0 {
            return (String::new(), 0);
        }

        let bits = self.precision.bits();
        let magnitude = self.mantissa.magnitude();

        // value >= 2^binary_exponent, so value >= 10^decimal_exponent (up to f64 slop)
        let binary_exponent = magnitude.bits() as i64 - bits as i64 - 1;
        let decimal_exponent = (binary_exponent as f64 * LOG10_2).floor() as i64;

        // Scale so the integer part carries at least `digits + 1` digits.
        let shift = digits as i64 - decimal_exponent + 1;
        let scaled = if shift >= 0 {
            (magnitude * pow10(shift as u64)) >> bits
        } else {
            (magnitude >> bits) / pow10(shift.unsigned_abs())
        };
        if scaled.is_zero() {
            return (String::new(), 0);
        }

        let mut significand = scaled.to_string();
        let exponent = significand.len() as i64 - shift;
        significand.truncate(digits);
        let kept = significand.trim_end_matches('0').len();
        significand.truncate(kept);

        if self.mantissa.is_negative() {
            significand.insert(0, '-');
        }
        (significand, exponent)
    }

    /// Positional decimal rendering with at most `digits` significant digits.
    ///
    /// # Example
    /// ```
    /// use picalc_core::fixed::FixedPoint;
    /// use picalc_core::precision::Precision;
    /// use num_rational::BigRational;
    /// use num_bigint::BigInt;
    ///
    /// let precision = Precision::from_digits(20).unwrap();
    /// let third = BigRational::new(BigInt::from(1), BigInt::from(3));
    /// let value = FixedPoint::from_rational(&third, precision);
    /// assert_eq!(value.to_decimal_string(5), "0.33333");
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_decimal_string(&self, digits: usize) -> String {
        let (significand, exponent) = self.to_decimal_parts(digits);
        let (sign, body) = match significand.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", significand.as_str()),
        };
        if body.is_empty() {
            return "0".to_string();
        }

        if exponent <= 0 {
            let zeros = "0".repeat(exponent.unsigned_abs() as usize);
            return format!("{sign}0.{zeros}{body}");
        }

        let int_len = exponent as usize;
        if body.len() <= int_len {
            let zeros = "0".repeat(int_len - body.len());
            format!("{sign}{body}{zeros}")
        } else {
            format!("{sign}{}.{}", &body[..int_len], &body[int_len..])
        }
    }
}

impl fmt::Display for FixedPoint {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string(self.precision.digits() as usize))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn pow10(exponent: u64) -> BigUint {
    num_traits::pow(BigUint::from(10u32), exponent as usize)
}
