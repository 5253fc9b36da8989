//! `write_domainlabels`: append domain label counts to a YAML stats file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glossa_domain::{append_domain_labels, read_label_counts};

use crate::input::open_input;
use crate::logging::LoggingArgs;

/// Append `count label` lines to a YAML stats file as a JSON string
#[derive(Debug, Parser)]
#[command(name = "write_domainlabels", version, about)]
pub struct WriteDomainLabelsArgs {
    /// Input domain labels counts file
    #[arg(value_name = "DLCOUNTS")]
    pub dlcounts: PathBuf,

    /// Output YAML stats file (appended to)
    #[arg(value_name = "YAMLFILE")]
    pub yamlfile: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl WriteDomainLabelsArgs {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.logging.init()?;

        let reader = open_input(Some(&self.dlcounts))?;
        let counts = read_label_counts(reader)
            .with_context(|| format!("Failed to read label counts: {}", self.dlcounts.display()))?;
        append_domain_labels(&self.yamlfile, &counts)
            .with_context(|| format!("Failed to write stats: {}", self.yamlfile.display()))?;

        log::info!("Wrote {} domain labels", counts.len());
        Ok(())
    }
}
