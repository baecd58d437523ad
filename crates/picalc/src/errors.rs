//! Application errors and exit codes.

use std::io;
use std::path::PathBuf;

use picalc_core::constants::exit_codes;
use picalc_core::error::PiError;

/// Failures outside the calculation itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("computed digits differ from the reference after {0} decimal places")]
    Mismatch(usize),

    #[error("cannot read reference digits from {path}")]
    Reference {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write result to {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Map a calculation error to its exit code.
pub fn handle_error(err: &PiError) -> i32 {
    match err {
        PiError::Calculation(_) => exit_codes::ERROR_GENERIC,
        PiError::Allocation(_) => exit_codes::ERROR_ALLOCATION,
        PiError::InvalidIterations(_) | PiError::InvalidPrecision(_) | PiError::Config(_) => {
            exit_codes::ERROR_CONFIG
        }
        PiError::Cancelled => exit_codes::ERROR_CANCELED,
        PiError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
    }
}

/// Exit code for an error returned by [`crate::app::run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<PiError>() {
        return handle_error(e);
    }
    match err.downcast_ref::<AppError>() {
        Some(AppError::Mismatch(_)) => exit_codes::ERROR_MISMATCH,
        _ => exit_codes::ERROR_GENERIC,
    }
}
