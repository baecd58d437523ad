//! CLI output formatting and report serialization.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use picalc_orchestration::{Convergence, RunResult};

use crate::verify::Accuracy;

/// Truncate a long rendering of π for display unless `verbose` is set.
#[must_use]
pub fn format_pi(text: &str, verbose: bool) -> String {
    if !verbose && text.len() > 100 {
        format!(
            "{}...{} ({} digits)",
            &text[..50],
            &text[text.len() - 50..],
            text.bytes().filter(u8::is_ascii_digit).count()
        )
    } else {
        text.to_string()
    }
}

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Write the significand digits to a file, without decimal point or exponent.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, significand: &str) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{significand}")?;
    Ok(())
}

/// Machine-readable summary of a run, emitted with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub iterations: u64,
    pub digits: u64,
    pub bits: Option<u64>,
    pub estimated_correct_digits: u64,
    pub precalc_ms: f64,
    pub assemble_ms: f64,
    pub pi: Option<String>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Accuracy>,
}

impl RunReport {
    /// Build a report from a finished run, rendering `digits` significant digits.
    #[must_use]
    pub fn from_result(result: &RunResult) -> Self {
        let digits = usize::try_from(result.digits).unwrap_or(usize::MAX);
        let (pi, error) = match &result.outcome {
            Ok(value) => (Some(value.to_decimal_string(digits)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            iterations: result.iterations,
            digits: result.digits,
            bits: result.value().map(|v| v.precision().bits()),
            estimated_correct_digits: picalc_core::progress::estimated_correct_digits(
                result.iterations,
            ),
            precalc_ms: result.precalc_duration.as_secs_f64() * 1000.0,
            assemble_ms: result.assemble_duration.as_secs_f64() * 1000.0,
            pi,
            error,
            accuracy: None,
        }
    }

    /// Attach a reference comparison.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

/// Serialize run reports and an optional convergence table as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(
    reports: &[RunReport],
    convergence: Option<&[Convergence]>,
) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Document<'a> {
        runs: &'a [RunReport],
        #[serde(skip_serializing_if = "Option::is_none")]
        convergence: Option<Vec<ConvergenceRow>>,
    }

    #[derive(Serialize)]
    struct ConvergenceRow {
        iterations: u64,
        agreeing_digits: usize,
    }

    let convergence = convergence.map(|rows| {
        rows.iter()
            .map(|c| ConvergenceRow {
                iterations: c.iterations,
                agreeing_digits: c.agreeing_digits,
            })
            .collect()
    });
    serde_json::to_string_pretty(&Document {
        runs: reports,
        convergence,
    })
}
