use std::process::ExitCode;

use clap::Parser;
use glossa_cli::commands::DomainLabelsArgs;
use glossa_cli::error::exit_status;

fn main() -> ExitCode {
    exit_status(DomainLabelsArgs::parse().execute())
}
