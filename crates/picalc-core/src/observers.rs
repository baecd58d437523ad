//! Concrete progress observers.

use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, TrySendError};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::observer::ProgressObserver;
use crate::progress::ProgressUpdate;

/// Forwards updates to a channel with `try_send`.
///
/// A full or disconnected channel drops the update.
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if let Err(TrySendError::Full(dropped)) = self.sender.try_send(update.clone()) {
            trace!(stage = %dropped.stage, "Progress channel full, update dropped");
        }
    }
}

/// Logs stage completion at INFO and intermediate progress at DEBUG,
/// at most once per `min_interval`.
pub struct LoggingObserver {
    min_interval: Duration,
    last_logged: Mutex<Option<Instant>>,
}

impl LoggingObserver {
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(min_interval_ms),
            last_logged: Mutex::new(None),
        }
    }

    fn due(&self) -> bool {
        let mut last = self.last_logged.lock();
        let now = Instant::now();
        match *last {
            Some(at) if now.duration_since(at) < self.min_interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if update.done {
            info!(stage = %update.stage, steps = update.total_steps, "Stage complete");
        } else if self.due() {
            debug!(
                stage = %update.stage,
                percent = format!("{:.1}", update.progress * 100.0),
                step = update.current_step,
                total = update.total_steps,
                "Stage progress"
            );
        }
    }
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}

    fn threshold(&self) -> f64 {
        1.0
    }
}
