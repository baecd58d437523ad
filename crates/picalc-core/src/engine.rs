//! Precalculation engine: fork P and Q, join, then accumulate S.

use tracing::info;

use crate::error::PiError;
use crate::observer::ProgressObserver;
use crate::progress::{estimated_correct_digits, CancellationToken};
use crate::sequences::{accumulate_s, generate_p, generate_q, validate_iterations, SSequence};

/// Compute S(1,1)…S(1,n).
///
/// P and Q are generated as two independent `rayon::join` tasks that each
/// return their sequence by value. The join is the only barrier; S then runs
/// on the calling thread and P and Q are dropped once it has consumed them.
/// Either a complete S-sequence is returned or an error, never a partial one.
///
/// # Example
/// ```
/// use picalc_core::engine::precalculate;
/// use picalc_core::observers::NoOpObserver;
/// use picalc_core::progress::CancellationToken;
///
/// let s = precalculate(4, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
/// assert_eq!(s.len(), 4);
/// assert_eq!(s[0].to_string(), "0");
/// ```
pub fn precalculate(
    n: u64,
    cancel: &CancellationToken,
    observer: &dyn ProgressObserver,
) -> Result<SSequence, PiError> {
    validate_iterations(n)?;
    info!(n, "Calculating P(1,n) and Q(1,n) for n in [1,{n}]");

    let (p, q) = rayon::join(
        || generate_p(n, cancel, observer),
        || generate_q(n, cancel, observer),
    );
    let (p, q) = (p?, q?);

    info!(
        n,
        estimated_digits = estimated_correct_digits(n),
        "Calculating S(1,n) for n in [1,{n}]"
    );
    let s = accumulate_s(&p, &q, cancel, observer)?;
    info!(n, "Finished calculating S(1,n)");
    Ok(s)
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::observers::NoOpObserver;
    use crate::progress::{ProgressUpdate, Stage};

    struct RecordingObserver {
        done: Mutex<Vec<Stage>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn on_progress(&self, update: &ProgressUpdate) {
            if update.done {
                self.done.lock().push(update.stage);
            }
        }
    }

    #[test]
    fn zero_iterations_is_precondition_violation() {
        let result = precalculate(0, &CancellationToken::new(), &NoOpObserver::new());
        assert!(matches!(result, Err(PiError::InvalidIterations(0))));
    }

    #[test]
    fn single_iteration() {
        let s = precalculate(1, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].to_string(), "0");
    }

    #[test]
    fn idempotent() {
        let cancel = CancellationToken::new();
        let observer = NoOpObserver::new();
        let a = precalculate(40, &cancel, &observer).unwrap();
        let b = precalculate(40, &cancel, &observer).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn s_runs_after_both_generators() {
        let observer = RecordingObserver {
            done: Mutex::new(Vec::new()),
        };
        precalculate(20, &CancellationToken::new(), &observer).unwrap();
        let done = observer.done.lock();
        assert_eq!(done.len(), 3);
        assert!(done[..2].contains(&Stage::P));
        assert!(done[..2].contains(&Stage::Q));
        assert_eq!(done[2], Stage::S);
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = precalculate(50, &cancel, &NoOpObserver::new());
        assert!(matches!(result, Err(PiError::Cancelled)));
    }
}
