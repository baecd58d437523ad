//! Orchestration interfaces.

use std::time::Duration;

use picalc_core::error::PiError;
use picalc_core::fixed::FixedPoint;
use picalc_core::progress::ProgressUpdate;

/// Trait for reporting progress to the user.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress update.
    fn report(&self, update: &ProgressUpdate);

    /// Report completion.
    fn complete(&self);
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a single run.
    fn present_result(&self, result: &RunResult, details: bool);

    /// Present a convergence table for a sweep.
    fn present_convergence(&self, report: &[Convergence]);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Outcome of one precalculate-and-assemble run.
#[derive(Debug)]
pub struct RunResult {
    /// Number of Chudnovsky iterations.
    pub iterations: u64,
    /// Precision budget in decimal digits.
    pub digits: u64,
    /// The approximant or a structured error.
    pub outcome: Result<FixedPoint, PiError>,
    /// Time spent generating P, Q and S.
    pub precalc_duration: Duration,
    /// Time spent in the final square root and division.
    pub assemble_duration: Duration,
}

impl RunResult {
    /// Total wall-clock time of the run.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.precalc_duration + self.assemble_duration
    }

    /// The approximant, if the run succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&FixedPoint> {
        self.outcome.as_ref().ok()
    }
}

/// How many leading significand digits of a run agree with the sweep's
/// highest-iteration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convergence {
    /// Iteration count of the run.
    pub iterations: u64,
    /// Number of leading significand digits shared with the reference run.
    pub agreeing_digits: usize,
}

/// Null progress reporter (does nothing).
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report(&self, _update: &ProgressUpdate) {}
    fn complete(&self) {}
}
