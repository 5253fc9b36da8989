//! Input handling

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::CliError;

/// Open a file for line reading; `None` or `-` reads stdin
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()).into());
            }
            let file = File::open(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}
