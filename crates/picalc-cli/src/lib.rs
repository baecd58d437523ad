//! # picalc-cli
//!
//! CLI output, progress display, reference-digit verification, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod progress;
pub mod ui;
pub mod verify;

pub use presenter::CLIResultPresenter;
pub use progress::CLIProgressReporter;
