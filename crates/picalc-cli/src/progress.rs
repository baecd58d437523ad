//! Progress bars for the P, Q, S and assembly stages.

use std::collections::HashMap;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;
use tracing::debug;

use picalc_core::progress::{ProgressUpdate, Stage};
use picalc_orchestration::interfaces::ProgressReporter;

const BAR_TEMPLATE: &str = "{prefix:>8} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// `indicatif` reporter with one bar per stage.
pub struct CLIProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Stage, ProgressBar>>,
}

impl CLIProgressReporter {
    /// Create a reporter drawing to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a reporter that draws nothing.
    #[must_use]
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn bar_for(&self, stage: Stage, total: u64) -> ProgressBar {
        let mut bars = self.bars.lock();
        bars.entry(stage)
            .or_insert_with(|| {
                let style = ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar());
                let bar = self.multi.add(ProgressBar::new(total).with_style(style));
                bar.set_prefix(stage.label());
                bar
            })
            .clone()
    }

    /// Number of stages seen so far.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.bars.lock().len()
    }
}

impl Default for CLIProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CLIProgressReporter {
    fn report(&self, update: &ProgressUpdate) {
        let bar = self.bar_for(update.stage, update.total_steps);
        if bar.length() != Some(update.total_steps) {
            bar.set_length(update.total_steps);
        }
        bar.set_position(update.current_step);
        if update.done {
            bar.finish_with_message("done");
        }
    }

    fn complete(&self) {
        for bar in self.bars.lock().values() {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}

/// Forward channel updates to `reporter` on a background thread until every
/// sender is dropped, then signal completion.
pub fn spawn_progress_display<R>(rx: Receiver<ProgressUpdate>, reporter: R) -> JoinHandle<()>
where
    R: ProgressReporter + 'static,
{
    std::thread::spawn(move || {
        let mut received = 0u64;
        for update in rx {
            reporter.report(&update);
            received += 1;
        }
        reporter.complete();
        debug!(received, "Progress channel closed");
    })
}
