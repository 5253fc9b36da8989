//! Glossa CLI library
//!
//! Command-line stages built on `glossa-core` (per-language tokenization)
//! and `glossa-domain` (domain labelling and label statistics).

pub mod commands;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;

pub use error::{CliError, CliResult};
