//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use picalc_cli::output::{to_json, write_to_file, RunReport};
use picalc_cli::presenter::CLIResultPresenter;
use picalc_cli::progress::{spawn_progress_display, CLIProgressReporter};
use picalc_cli::verify::{compare_digits, load_reference, Accuracy};
use picalc_core::observer::{ProgressObserver, ProgressSubject};
use picalc_core::observers::{ChannelObserver, LoggingObserver, NoOpObserver};
use picalc_core::progress::{estimated_correct_digits, CancellationToken};
use picalc_orchestration::interfaces::{ResultPresenter, RunResult};
use picalc_orchestration::orchestrator::{
    analyze_convergence, execute_run_with_observer, execute_sweep,
};

use crate::config::AppConfig;
use crate::errors::AppError;

const LOG_INTERVAL_MS: u64 = 500;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        picalc_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let cancel = match config.timeout_duration()? {
        Some(timeout) => CancellationToken::with_timeout(timeout),
        None => CancellationToken::new(),
    };
    ctrlc_handler(cancel.clone());

    if config.sweep.is_empty() {
        run_single(config, &cancel)
    } else {
        run_sweep(config, &cancel)
    }
}

fn run_single(config: &AppConfig, cancel: &CancellationToken) -> Result<()> {
    let opts = config.options();
    let presenter = CLIResultPresenter::new(config.verbose, config.quiet || config.json);
    presenter.present_start(opts.iterations, opts.digits);

    let subject = ProgressSubject::new();
    let display = if config.quiet || config.json {
        None
    } else {
        let (tx, rx) = crossbeam_channel::unbounded();
        subject.register(Arc::new(ChannelObserver::new(tx)));
        Some(spawn_progress_display(rx, CLIProgressReporter::new()))
    };
    if config.verbose {
        subject.register(Arc::new(LoggingObserver::new(LOG_INTERVAL_MS)));
    }

    let result = execute_run_with_observer(&opts, cancel, &subject);

    // Dropping the channel sender lets the display thread finish.
    subject.clear();
    if let Some(handle) = display {
        if handle.join().is_err() {
            warn!("progress display thread panicked");
        }
    }

    let value = match result.value() {
        Some(value) => value,
        None => return Err(into_error(result)),
    };

    let digits = usize::try_from(opts.digits).unwrap_or(usize::MAX);
    let (significand, _) = value.to_decimal_parts(digits);
    let accuracy = check_reference(config, &significand)?;
    let expected = estimated_correct_digits(opts.iterations).min(opts.digits);

    if config.json {
        let mut report = RunReport::from_result(&result);
        if let Some(accuracy) = accuracy {
            report = report.with_accuracy(accuracy);
        }
        println!("{}", to_json(&[report], None)?);
    } else {
        presenter.present_result(&result, config.details);
        if let Some(accuracy) = &accuracy {
            presenter.present_accuracy(accuracy, expected);
        }
    }

    if let Some(path) = &config.output {
        write_to_file(path, &significand).map_err(|source| AppError::Output {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), digits = significand.len(), "Result written");
    }

    match accuracy {
        Some(found @ Accuracy::CorrectTo { places }) if !found.meets(expected) => {
            Err(AppError::Mismatch(places).into())
        }
        _ => Ok(()),
    }
}

fn run_sweep(config: &AppConfig, cancel: &CancellationToken) -> Result<()> {
    let opts = config.options();
    let observer: Box<dyn ProgressObserver> = if config.verbose {
        Box::new(LoggingObserver::new(LOG_INTERVAL_MS))
    } else {
        Box::new(NoOpObserver::new())
    };

    info!(runs = config.sweep.len(), digits = opts.digits, "Starting sweep");
    let mut results = execute_sweep(&config.sweep, &opts, cancel, observer.as_ref());

    if let Some(pos) = results.iter().position(|r| r.outcome.is_err()) {
        return Err(into_error(results.swap_remove(pos)));
    }
    let report = analyze_convergence(&results)?;

    if config.json {
        let runs: Vec<RunReport> = results.iter().map(RunReport::from_result).collect();
        println!("{}", to_json(&runs, Some(&report))?);
        return Ok(());
    }

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet);
    if config.details {
        for result in &results {
            presenter.present_result(result, true);
        }
    }
    presenter.present_convergence(&report);
    Ok(())
}

fn check_reference(config: &AppConfig, significand: &str) -> Result<Option<Accuracy>> {
    let Some(path) = &config.check else {
        return Ok(None);
    };
    let reference = load_reference(path).map_err(|source| AppError::Reference {
        path: path.clone(),
        source,
    })?;
    let accuracy = compare_digits(significand, &reference);
    info!(%accuracy, "Reference comparison");
    Ok(Some(accuracy))
}

fn into_error(result: RunResult) -> anyhow::Error {
    match result.outcome {
        Err(e) => e.into(),
        Ok(_) => anyhow::anyhow!("no error recorded for run of {} iterations", result.iterations),
    }
}

fn ctrlc_handler(cancel: CancellationToken) {
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!(error = %e, "Could not install Ctrl+C handler");
    }
}
