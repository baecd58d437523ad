//! GMP/MPFR-backed assembly using the `rug` crate.
//!
//! Only available when the `gmp` feature is enabled. Produces the same
//! approximant as `assembler::assemble_pi` through MPFR floats, which makes
//! it a cross-check for the fixed-point path.

use num_rational::BigRational;
use rug::{Float, Integer, Rational};

use crate::constants::{LINEAR_BASE, NUMERATOR_FACTOR, SQRT_RADICAND};
use crate::error::PiError;
use crate::precision::Precision;

fn to_rug(value: &num_bigint::BigInt) -> Result<Integer, PiError> {
    Integer::from_str_radix(&value.to_str_radix(16), 16)
        .map_err(|e| PiError::Calculation(format!("integer conversion: {e}")))
}

/// Assemble π with MPFR and render it with `digits` significant digits.
pub fn assemble_pi_gmp(
    last_s: &BigRational,
    precision: Precision,
    digits: usize,
) -> Result<String, PiError> {
    let bits = u32::try_from(precision.bits())
        .map_err(|_| PiError::Config(format!("{precision} exceeds MPFR limits")))?;

    let numerator = Float::with_val(bits, SQRT_RADICAND).sqrt() * NUMERATOR_FACTOR;

    let last = Rational::from((to_rug(last_s.numer())?, to_rug(last_s.denom())?));
    let denominator = Rational::from(LINEAR_BASE) + last;
    let denominator = Float::with_val(bits, &denominator);

    let pi = numerator / denominator;
    Ok(pi.to_string_radix(10, Some(digits)))
}
