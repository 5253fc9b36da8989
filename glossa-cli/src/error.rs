//! Error handling for the CLI application

use std::fmt;
use std::process::ExitCode;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

/// Report the outcome of a command and turn it into an exit status
///
/// Errors go to the log with their full cause chain, or to stderr when
/// logging was never set up.
pub fn exit_status(result: CliResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if log::max_level() == log::LevelFilter::Off {
                eprintln!("Error: {e:?}");
            } else {
                log::error!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("test.txt".to_string());
        assert_eq!(error.to_string(), "File not found: test.txt");
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Ok(())), ExitCode::SUCCESS);
        assert_eq!(
            exit_status(Err(anyhow::anyhow!("test error"))),
            ExitCode::FAILURE
        );
    }
}
