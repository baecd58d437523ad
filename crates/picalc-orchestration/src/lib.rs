//! # picalc-orchestration
//!
//! Timed run execution, parallel iteration sweeps, and convergence analysis.

pub mod interfaces;
pub mod orchestrator;

pub use interfaces::{Convergence, ProgressReporter, ResultPresenter, RunResult};
pub use orchestrator::{analyze_convergence, execute_run, execute_sweep};
