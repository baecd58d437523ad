//! CLI result presenter.

use picalc_core::progress::estimated_correct_digits;
use picalc_orchestration::interfaces::{Convergence, ResultPresenter, RunResult};

use crate::output::{format_duration, format_number, format_pi};
use crate::ui;
use crate::verify::Accuracy;

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print the announcement shown before a run starts.
    pub fn present_start(&self, iterations: u64, digits: u64) {
        if self.quiet {
            return;
        }
        ui::print_header(&format!(
            "Calculating pi with {} iterations of the Chudnovsky series",
            format_number(iterations)
        ));
        println!(
            "Precision: {} digits, about {} expected correct",
            format_number(digits),
            format_number(estimated_correct_digits(iterations).min(digits))
        );
    }

    /// Print the outcome of a reference comparison against `expected`
    /// correct significant digits.
    pub fn present_accuracy(&self, accuracy: &Accuracy, expected: u64) {
        match accuracy {
            Accuracy::AllCorrect { .. } => {
                if !self.quiet {
                    ui::print_success(&accuracy.to_string());
                }
            }
            Accuracy::CorrectTo { .. } if accuracy.meets(expected) => {
                if !self.quiet {
                    println!(
                        "Accurate: {accuracy} (about {} expected)",
                        format_number(expected)
                    );
                }
            }
            Accuracy::CorrectTo { .. } | Accuracy::ReferenceExhausted { .. } => {
                ui::print_warning(&accuracy.to_string());
            }
        }
    }
}

impl ResultPresenter for CLIResultPresenter {
    #[allow(clippy::cast_possible_truncation)]
    fn present_result(&self, result: &RunResult, details: bool) {
        let Some(value) = result.value() else {
            if let Err(e) = &result.outcome {
                self.present_error(&e.to_string());
            }
            return;
        };
        let text = value.to_decimal_string(result.digits as usize);

        if self.quiet {
            println!("{text}");
            return;
        }

        println!("Iterations: {}", format_number(result.iterations));
        println!("Duration: {}", format_duration(result.total_duration()));

        if details {
            println!("Precision: {}", value.precision());
            println!("Precalculation: {}", format_duration(result.precalc_duration));
            println!("Assembly: {}", format_duration(result.assemble_duration));
        }

        println!("pi = {}", format_pi(&text, self.verbose));
    }

    fn present_convergence(&self, report: &[Convergence]) {
        if self.quiet {
            return;
        }

        println!("\nConvergence:");
        println!("{:-<44}", "");
        println!("  {:>12} {:>12} {:>14}", "iterations", "agreeing", "estimated");
        for row in report {
            println!(
                "  {:>12} {:>12} {:>14}",
                format_number(row.iterations),
                format_number(row.agreeing_digits as u64),
                format_number(estimated_correct_digits(row.iterations)),
            );
        }
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use picalc_core::error::PiError;
    use picalc_core::fixed::FixedPoint;
    use picalc_core::precision::Precision;

    fn run(outcome: Result<FixedPoint, PiError>) -> RunResult {
        RunResult {
            iterations: 1,
            digits: 20,
            outcome,
            precalc_duration: Duration::from_millis(2),
            assemble_duration: Duration::from_millis(1),
        }
    }

    #[test]
    fn presenter_modes() {
        let presenter = CLIResultPresenter::new(true, false);
        assert!(presenter.verbose);
        assert!(!presenter.quiet);
    }

    #[test]
    fn present_result_all_modes() {
        let value = picalc_core::pi(1, 20).unwrap();
        for (verbose, quiet) in [(false, false), (true, false), (false, true)] {
            let presenter = CLIResultPresenter::new(verbose, quiet);
            presenter.present_result(&run(Ok(value.clone())), true);
        }
    }

    #[test]
    fn present_failed_result() {
        let presenter = CLIResultPresenter::new(false, false);
        presenter.present_result(&run(Err(PiError::Cancelled)), false);
    }

    #[test]
    fn present_convergence_and_accuracy() {
        let presenter = CLIResultPresenter::new(false, false);
        presenter.present_start(30, 1000);
        presenter.present_convergence(&[Convergence {
            iterations: 1,
            agreeing_digits: 14,
        }]);
        presenter.present_accuracy(&Accuracy::AllCorrect { digits: 20 }, 14);
        presenter.present_accuracy(&Accuracy::CorrectTo { places: 13 }, 14);
        presenter.present_accuracy(&Accuracy::CorrectTo { places: 3 }, 14);
    }

    #[test]
    fn quiet_convergence_is_silent() {
        let presenter = CLIResultPresenter::new(false, true);
        presenter.present_convergence(&[]);
        presenter.present_start(1, 1);
    }

    #[test]
    fn zero_value_still_renders() {
        let presenter = CLIResultPresenter::new(false, false);
        let zero = FixedPoint::zero(Precision::from_digits(5).unwrap());
        presenter.present_result(&run(Ok(zero)), false);
    }
}
