use std::process::ExitCode;

use clap::Parser;
use glossa_cli::commands::WriteDomainLabelsArgs;
use glossa_cli::error::exit_status;

fn main() -> ExitCode {
    exit_status(WriteDomainLabelsArgs::parse().execute())
}
