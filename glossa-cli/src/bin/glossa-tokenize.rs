use std::process::ExitCode;

use clap::Parser;
use glossa_cli::commands::TokenizeArgs;
use glossa_cli::error::exit_status;

fn main() -> ExitCode {
    exit_status(TokenizeArgs::parse().execute())
}
