//! Chudnovsky P, Q and S sequences.
//!
//! Index `i` of each sequence holds the value of the binary-split quantity
//! at `(1, i+1)`; index 0 is the recurrence base case.
//!
//!   P[i] = −(6i−1)(6i−5)(2i−1) · P[i−1],   P[0] = 1
//!   Q[i] = 10939058860032000 · i³ · Q[i−1], Q[0] = 1
//!   S[i] = S[i−1] + P[i]·(13591409 + 545140134·i) / Q[i],  S[0] = 0
//!
//! P and Q are independent of each other; S needs both complete.

use std::ops::Deref;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::debug;

use crate::constants::{
    LINEAR_BASE, LINEAR_SLOPE, MIN_ITERATIONS, Q_MULTIPLIER, S_PROGRESS_INTERVAL,
};
use crate::error::PiError;
use crate::observer::{ProgressObserver, StageReporter};
use crate::progress::{estimated_correct_digits, CancellationToken, Stage};

/// Append-once sequence of big values, one per iteration index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence<T> {
    values: Vec<T>,
}

impl<T> Sequence<T> {
    /// Consume the sequence and return its values.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

/// P(1,1)…P(1,n), alternating in sign.
pub type PSequence = Sequence<BigInt>;
/// Q(1,1)…Q(1,n), strictly positive.
pub type QSequence = Sequence<BigUint>;
/// S(1,1)…S(1,n), each in lowest terms.
pub type SSequence = Sequence<BigRational>;

/// Reject iteration counts below the minimum of 1.
pub fn validate_iterations(n: u64) -> Result<(), PiError> {
    if n < MIN_ITERATIONS {
        return Err(PiError::InvalidIterations(n));
    }
    Ok(())
}

/// Reserve the whole output buffer before the first step.
fn reserve<T>(n: u64, what: &str) -> Result<Vec<T>, PiError> {
    let len = usize::try_from(n)
        .map_err(|_| PiError::Allocation(format!("{what} ({n} elements exceed address space)")))?;
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|e| PiError::Allocation(format!("{what} ({len} elements): {e}")))?;
    Ok(values)
}

/// The small integer factor `−(6i−1)(6i−5)(2i−1)` linking P[i] to P[i−1].
///
/// Index 0 has no predecessor and yields the base value 1.
#[must_use]
pub fn p_factor(i: u64) -> BigInt {
    if i == 0 {
        return BigInt::one();
    }
    let i = u128::from(i);
    -(BigInt::from(6 * i - 1) * BigInt::from(6 * i - 5) * BigInt::from(2 * i - 1))
}

/// The factor `10939058860032000 · i³` linking Q[i] to Q[i−1].
///
/// Index 0 yields the base value 1.
#[must_use]
pub fn q_factor(i: u64) -> BigUint {
    if i == 0 {
        return BigUint::one();
    }
    BigUint::from(Q_MULTIPLIER) * BigUint::from(i).pow(3)
}

/// The canonical rational term `P[i]·(13591409 + 545140134·i) / Q[i]`.
#[must_use]
pub fn term(p_i: &BigInt, q_i: &BigUint, i: u64) -> BigRational {
    let linear = BigInt::from(LINEAR_BASE) + BigInt::from(LINEAR_SLOPE) * BigInt::from(i);
    BigRational::new(p_i * linear, BigInt::from(q_i.clone()))
}

/// Generate P(1,1)…P(1,n).
///
/// # Example
/// ```
/// use picalc_core::observers::NoOpObserver;
/// use picalc_core::progress::CancellationToken;
/// use picalc_core::sequences::generate_p;
///
/// let p = generate_p(3, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
/// let values: Vec<String> = p.iter().map(ToString::to_string).collect();
/// assert_eq!(values, ["1", "-5", "1155"]);
/// ```
pub fn generate_p(
    n: u64,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> Result<PSequence, PiError> {
    validate_iterations(n)?;
    let mut values: Vec<BigInt> = reserve(n, "P(1,n)")?;
    debug!(n, "Calculating P(1,n)");

    let mut reporter = StageReporter::new(observer, Stage::P, n);
    values.push(BigInt::one());
    for i in 1..n {
        cancel.check_cancelled()?;
        let next = &values[values.len() - 1] * p_factor(i);
        values.push(next);
        reporter.step(i + 1);
    }

    reporter.finish();
    Ok(Sequence { values })
}

/// Generate Q(1,1)…Q(1,n).
///
/// # Example
/// ```
/// use picalc_core::observers::NoOpObserver;
/// use picalc_core::progress::CancellationToken;
/// use picalc_core::sequences::generate_q;
///
/// let q = generate_q(2, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
/// assert_eq!(q[1].to_string(), "10939058860032000");
/// ```
pub fn generate_q(
    n: u64,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> Result<QSequence, PiError> {
    validate_iterations(n)?;
    let mut values: Vec<BigUint> = reserve(n, "Q(1,n)")?;
    debug!(n, "Calculating Q(1,n)");

    let mut reporter = StageReporter::new(observer, Stage::Q, n);
    values.push(BigUint::one());
    for i in 1..n {
        cancel.check_cancelled()?;
        let next = &values[values.len() - 1] * q_factor(i);
        values.push(next);
        reporter.step(i + 1);
    }

    reporter.finish();
    Ok(Sequence { values })
}

/// Accumulate S(1,1)…S(1,n) from complete P and Q sequences.
///
/// Strictly sequential: S[i] needs S[i−1]. The cancellation token is
/// consulted once per iteration.
pub fn accumulate_s(
    p: &PSequence,
    q: &QSequence,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> Result<SSequence, PiError> {
    if p.len() != q.len() {
        return Err(PiError::Calculation(format!(
            "P and Q lengths differ ({} vs {})",
            p.len(),
            q.len()
        )));
    }
    let n = p.len() as u64;
    validate_iterations(n)?;
    let mut values: Vec<BigRational> = reserve(n, "S(1,n)")?;
    debug!(
        n,
        estimated_digits = estimated_correct_digits(n),
        "Calculating S(1,n)"
    );

    let mut reporter = StageReporter::new(observer, Stage::S, n);
    values.push(BigRational::zero());
    for (i, (p_i, q_i)) in (1u64..).zip(p.iter().zip(q.iter()).skip(1)) {
        cancel.check_cancelled()?;
        let t = term(p_i, q_i, i);
        let next = if i == 1 {
            t
        } else {
            &values[values.len() - 1] + t
        };
        values.push(next);

        if i % S_PROGRESS_INTERVAL == 0 {
            debug!(
                step = i + 1,
                estimated_digits = estimated_correct_digits(n),
                "Iteration complete - S(1,{})",
                i + 1
            );
        }
        reporter.step(i + 1);
    }

    reporter.finish();
    Ok(Sequence { values })
}
