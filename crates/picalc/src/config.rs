//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use picalc_core::constants::{DEFAULT_DIGITS, DEFAULT_ITERATIONS};
use picalc_core::error::PiError;
use picalc_core::options::Options;

/// PiCalc-rs: compute π with the Chudnovsky series.
#[derive(Parser, Debug)]
#[command(name = "picalc", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of Chudnovsky iterations.
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS, env = "PICALC_N")]
    pub iterations: u64,

    /// Precision budget in decimal digits.
    #[arg(long, default_value_t = DEFAULT_DIGITS, env = "PICALC_DIGITS")]
    pub digits: u64,

    /// Write the significand digits to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compare the result against a reference digit file.
    #[arg(long, value_name = "FILE")]
    pub check: Option<PathBuf>,

    /// Run once per comma-separated iteration count and report convergence.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub sweep: Vec<u64>,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (only output the digits).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed information.
    #[arg(short, long)]
    pub details: bool,

    /// Abort after this long (e.g. "30s", "5m", "500ms").
    #[arg(long)]
    pub timeout: Option<String>,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Calculation options for a single run.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            iterations: self.iterations,
            digits: self.digits,
            verbose: self.verbose,
            details: self.details,
        }
    }

    /// The configured timeout, if any.
    pub fn timeout_duration(&self) -> Result<Option<Duration>, PiError> {
        self.timeout
            .as_deref()
            .map(|s| {
                parse_duration(s).ok_or_else(|| PiError::Config(format!("invalid timeout: {s:?}")))
            })
            .transpose()
    }
}

/// Parse a duration like "250ms", "30s", "5m", "1h" or bare seconds.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (value, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()));
    let value: u64 = value.parse().ok()?;
    match unit.trim() {
        "" | "s" => Some(Duration::from_secs(value)),
        "ms" => Some(Duration::from_millis(value)),
        "m" => value.checked_mul(60).map(Duration::from_secs),
        "h" => value.checked_mul(3600).map(Duration::from_secs),
        _ => None,
    }
}
