//! Progress observation for the P, Q and S loops.
//!
//! Each generator owns a [`StageReporter`] for the duration of its loop, so
//! the concurrent P and Q tasks never share throttling state.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::progress::{ProgressUpdate, Stage};

/// Receiver of progress updates. Implementations must not block.
pub trait ProgressObserver: Send + Sync {
    /// Receive a progress update.
    fn on_progress(&self, update: &ProgressUpdate);

    /// Minimum change in completed fraction between two reported updates.
    fn threshold(&self) -> f64 {
        PROGRESS_REPORT_THRESHOLD
    }
}

/// Throttled progress emitter for one stage of one run.
pub struct StageReporter<'a> {
    observer: &'a dyn ProgressObserver,
    stage: Stage,
    total: u64,
    threshold: f64,
    last_reported: f64,
}

impl<'a> StageReporter<'a> {
    #[must_use]
    pub fn new(observer: &'a dyn ProgressObserver, stage: Stage, total: u64) -> Self {
        Self {
            observer,
            stage,
            total,
            threshold: observer.threshold(),
            last_reported: 0.0,
        }
    }

    /// Record that `current` of `total` steps are complete.
    #[inline]
    pub fn step(&mut self, current: u64) {
        let update = ProgressUpdate::new(self.stage, current, self.total);
        if update.progress - self.last_reported >= self.threshold {
            self.last_reported = update.progress;
            self.observer.on_progress(&update);
        }
    }

    /// Emit the final update for the stage. Always delivered.
    pub fn finish(self) {
        self.observer
            .on_progress(&ProgressUpdate::done(self.stage, self.total));
    }

    /// Fraction carried by the last delivered update.
    #[must_use]
    pub fn last_reported(&self) -> f64 {
        self.last_reported
    }
}

/// Fan-out observer forwarding each update to every subscriber.
#[derive(Default)]
pub struct ProgressSubject {
    subscribers: RwLock<Vec<Arc<dyn ProgressObserver>>>,
}

impl ProgressSubject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber.
    pub fn register(&self, observer: Arc<dyn ProgressObserver>) {
        self.subscribers.write().push(observer);
    }

    /// Drop every subscriber. Dropping a `ChannelObserver` closes its channel.
    pub fn clear(&self) {
        self.subscribers.write().clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl ProgressObserver for ProgressSubject {
    fn on_progress(&self, update: &ProgressUpdate) {
        for subscriber in self.subscribers.read().iter() {
            subscriber.on_progress(update);
        }
    }

    /// The finest threshold among the subscribers.
    fn threshold(&self) -> f64 {
        self.subscribers
            .read()
            .iter()
            .map(|s| s.threshold())
            .fold(PROGRESS_REPORT_THRESHOLD, f64::min)
    }
}
