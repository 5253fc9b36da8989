//! Logging flags shared by every binary

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/// Logging options
#[derive(Debug, Clone, Default, Args)]
pub struct LoggingArgs {
    /// Silent logging mode (errors only)
    #[arg(short, long, help_heading = "Logging")]
    pub quiet: bool,

    /// Debug logging mode
    #[arg(long, help_heading = "Logging")]
    pub debug: bool,

    /// Info logging mode
    #[arg(long, help_heading = "Logging")]
    pub info: bool,

    /// Append the log to a file instead of stderr
    #[arg(long, value_name = "FILE", help_heading = "Logging")]
    pub logfile: Option<PathBuf>,
}

impl LoggingArgs {
    /// Default filter selected by the flags; `RUST_LOG` still wins
    pub fn level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.info {
            "info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Initialize the global logger
    pub fn init(&self) -> Result<()> {
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(self.level()));

        if let Some(path) = &self.logfile {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        builder.try_init().context("Logger already initialized")?;
        Ok(())
    }
}
