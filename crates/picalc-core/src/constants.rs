//! Constants of the Chudnovsky series and run configuration defaults.

/// Default number of series iterations when the caller does not pick one.
pub const DEFAULT_ITERATIONS: u64 = 30;

/// Default precision budget in decimal digits.
pub const DEFAULT_DIGITS: u64 = 1_000;

/// Minimum valid iteration count. The S-sequence has no terms below this.
pub const MIN_ITERATIONS: u64 = 1;

/// Bits of precision per requested decimal digit, as the ratio
/// `BITS_PER_DIGIT_NUM / BITS_PER_DIGIT_DEN` (3.5).
pub const BITS_PER_DIGIT_NUM: u64 = 7;
/// Denominator of the bits-per-digit ratio.
pub const BITS_PER_DIGIT_DEN: u64 = 2;

/// Approximate number of correct decimal digits contributed by each term.
pub const DIGITS_PER_ITERATION: f64 = 14.181_65;

/// Constant part of the linear term `13591409 + 545140134·i`.
pub const LINEAR_BASE: u64 = 13_591_409;

/// Slope of the linear term `13591409 + 545140134·i`.
pub const LINEAR_SLOPE: u64 = 545_140_134;

/// Per-step Q multiplier, `640320³ / 24`.
pub const Q_MULTIPLIER: u64 = 10_939_058_860_032_000;

/// Integer factor of the final numerator `426880·√10005`.
pub const NUMERATOR_FACTOR: u64 = 426_880;

/// Radicand of the final numerator `426880·√10005`.
pub const SQRT_RADICAND: u64 = 10_005;

/// The S accumulator emits a debug log line every this many iterations.
pub const S_PROGRESS_INTERVAL: u64 = 200;

/// Correct significant digits may fall this far short of the estimate
/// before a reference comparison counts as a failure.
pub const ACCURACY_SLACK_DIGITS: u64 = 2;

/// Minimum progress change (1%) before reporting an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Computation timed out.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Computed digits disagree with the reference digits.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration (iteration count, precision, flags).
    pub const ERROR_CONFIG: i32 = 4;
    /// A sequence buffer could not be allocated.
    pub const ERROR_ALLOCATION: i32 = 5;
    /// Computation cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
