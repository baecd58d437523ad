//! # picalc-core
//!
//! Core library for the PiCalc-rs high-precision π calculator.
//! Implements the Chudnovsky series through the P, Q and S recurrences,
//! with P and Q generated concurrently and S accumulated afterwards.

pub mod assembler;
pub mod constants;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod observer;
pub mod observers;
pub mod options;
pub mod precision;
pub mod progress;
pub mod sequences;

#[cfg(feature = "gmp")]
pub mod assembler_gmp;

// Re-exports
pub use assembler::{assemble_from_sequence, assemble_pi};
pub use constants::{exit_codes, DEFAULT_DIGITS, DEFAULT_ITERATIONS, PROGRESS_REPORT_THRESHOLD};
pub use engine::precalculate;
pub use error::PiError;
pub use fixed::FixedPoint;
pub use observer::{ProgressObserver, ProgressSubject, StageReporter};
pub use options::Options;
pub use precision::Precision;
pub use progress::{CancellationToken, ProgressUpdate, Stage};

/// Compute π with `iterations` Chudnovsky terms at a `digits`-digit budget.
///
/// This is a convenience function for simple use cases. For progress,
/// cancellation or access to the sequences, use `engine::precalculate`
/// and `assembler::assemble_pi` directly.
///
/// # Example
/// ```
/// let pi = picalc_core::pi(30, 50).unwrap();
/// assert!(pi.to_decimal_string(15).starts_with("3.14159265358979"));
/// ```
pub fn pi(iterations: u64, digits: u64) -> Result<FixedPoint, PiError> {
    let opts = Options {
        iterations,
        digits,
        ..Options::default()
    };
    let precision = opts.validate()?;
    let s = precalculate(
        iterations,
        &CancellationToken::new(),
        &observers::NoOpObserver::new(),
    )?;
    assemble_from_sequence(&s, precision)
}
