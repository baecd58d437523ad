//! Core orchestration: timed runs, parallel sweeps and convergence analysis.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use picalc_core::assembler::assemble_from_sequence;
use picalc_core::engine::precalculate;
use picalc_core::error::PiError;
use picalc_core::fixed::FixedPoint;
use picalc_core::observer::ProgressObserver;
use picalc_core::observers::NoOpObserver;
use picalc_core::options::Options;
use picalc_core::progress::{CancellationToken, ProgressUpdate, Stage};

use crate::interfaces::{Convergence, RunResult};

/// Execute one run with the given options.
pub fn execute_run(opts: &Options, cancel: &CancellationToken) -> RunResult {
    execute_run_with_observer(opts, cancel, &NoOpObserver::new())
}

/// Execute one run: precalculate S, then assemble π, timing both phases.
pub fn execute_run_with_observer(
    opts: &Options,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> RunResult {
    let mut timings = (Duration::ZERO, Duration::ZERO);
    let outcome = run_pipeline(opts, cancel, observer, &mut timings);
    let (precalc_duration, assemble_duration) = timings;

    match &outcome {
        Ok(_) => info!(
            iterations = opts.iterations,
            digits = opts.digits,
            precalc = ?precalc_duration,
            assemble = ?assemble_duration,
            "Run complete"
        ),
        Err(e) => warn!(iterations = opts.iterations, error = %e, "Run failed"),
    }

    RunResult {
        iterations: opts.iterations,
        digits: opts.digits,
        outcome,
        precalc_duration,
        assemble_duration,
    }
}

fn run_pipeline(
    opts: &Options,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
    timings: &mut (Duration, Duration),
) -> Result<FixedPoint, PiError> {
    let precision = opts.validate()?;

    let start = Instant::now();
    let s = precalculate(opts.iterations, cancel, observer);
    timings.0 = start.elapsed();
    let s = s?;

    let start = Instant::now();
    let value = assemble_from_sequence(&s, precision);
    timings.1 = start.elapsed();
    observer.on_progress(&ProgressUpdate::done(Stage::Assemble, 1));
    value
}

/// Execute one run per iteration count, in parallel, at a shared precision.
///
/// Results are returned in the order of `iterations`.
pub fn execute_sweep(
    iterations: &[u64],
    opts: &Options,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> Vec<RunResult> {
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    iterations
        .par_iter()
        .map(|&n| {
            let run_opts = Options {
                iterations: n,
                ..opts.clone()
            };
            execute_run_with_observer(&run_opts, cancel, observer)
        })
        .collect()
}

/// Compare every successful run against the highest-iteration one.
///
/// The report is sorted by iteration count. Agreement is measured on the
/// significands rendered at each run's digit budget, and is zero when the
/// decimal exponents differ.
pub fn analyze_convergence(results: &[RunResult]) -> Result<Vec<Convergence>, PiError> {
    let mut valid: Vec<(&RunResult, (String, i64))> = results
        .iter()
        .filter_map(|r| {
            let value = r.value()?;
            let digits = usize::try_from(r.digits).ok()?;
            Some((r, value.to_decimal_parts(digits)))
        })
        .collect();

    if valid.is_empty() {
        return Err(PiError::Calculation("no valid results".into()));
    }
    valid.sort_by_key(|(r, _)| r.iterations);

    let (_, (reference, reference_exp)) = &valid[valid.len() - 1];
    let report = valid
        .iter()
        .map(|(r, (significand, exponent))| {
            let agreeing_digits = if exponent == reference_exp {
                common_prefix_len(significand, reference)
            } else {
                0
            };
            Convergence {
                iterations: r.iterations,
                agreeing_digits,
            }
        })
        .collect();
    Ok(report)
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
