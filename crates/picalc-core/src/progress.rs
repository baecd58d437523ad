//! Progress events and cooperative cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::PiError;

/// Pipeline stage that produced a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// P(1,i) numerator recurrence.
    P,
    /// Q(1,i) denominator recurrence.
    Q,
    /// S(1,i) rational partial sums.
    S,
    /// Final square root and division.
    Assemble,
}

impl Stage {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::P => "P(1,n)",
            Self::Q => "Q(1,n)",
            Self::S => "S(1,n)",
            Self::Assemble => "assemble",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress update sent from the engine to observers.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    /// Stage producing this update.
    pub stage: Stage,
    /// Current progress as a fraction in [0.0, 1.0].
    pub progress: f64,
    /// Current iteration index.
    pub current_step: u64,
    /// Total number of iterations of the stage.
    pub total_steps: u64,
    /// Whether this is the final update of the stage.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create a new progress update.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(stage: Stage, current: u64, total: u64) -> Self {
        let progress = if total == 0 {
            0.0
        } else {
            current as f64 / total as f64
        };
        Self {
            stage,
            progress,
            current_step: current,
            total_steps: total,
            done: false,
        }
    }

    /// Create a completion update.
    #[must_use]
    pub fn done(stage: Stage, total: u64) -> Self {
        Self {
            stage,
            progress: 1.0,
            current_step: total,
            total_steps: total,
            done: true,
        }
    }
}

/// Estimated number of correct decimal digits after `n` iterations.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimated_correct_digits(n: u64) -> u64 {
    (n as f64 * crate::constants::DIGITS_PER_ITERATION) as u64
}

/// Cooperative cancellation token with an optional deadline.
///
/// # Example
/// ```
/// use picalc_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
    timeout: Duration,
}

impl CancellationToken {
    /// Create a new cancellation token without a deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: None,
            timeout: Duration::ZERO,
        }
    }

    /// Create a token that also trips once `timeout` has elapsed.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
            timeout,
        }
    }

    /// Check if cancellation was requested or the deadline passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed) || self.is_expired()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Time left before the deadline, if one is set.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Checkpoint for engine loops.
    ///
    /// Manual cancellation takes priority over an expired deadline.
    /// ```
    /// use picalc_core::progress::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(token.check_cancelled().is_ok());
    ///
    /// token.cancel();
    /// assert!(token.check_cancelled().is_err());
    /// ```
    pub fn check_cancelled(&self) -> Result<(), PiError> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(PiError::Cancelled);
        }
        if self.is_expired() {
            return Err(PiError::Timeout(format!("{:?}", self.timeout)));
        }
        Ok(())
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
