//! `domainlabels`: label each document of a corpus with its domain

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::Parser;
use glossa_domain::{
    classify_stream, CandleClassifier, ClassifierConfig, DomainLabeler, InputMode, OnMalformed,
    StreamOptions, DEFAULT_BATCH_SIZE, DEFAULT_FIELD,
};

use crate::input::open_input;
use crate::logging::LoggingArgs;
use crate::output::open_output;

/// Label each input document with its EuroVoc domain
#[derive(Debug, Parser)]
#[command(name = "domainlabels", version, about)]
pub struct DomainLabelsArgs {
    /// Input documents, one per line (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output labels, one per line (default: stdout)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Name of the JSON field that contains the text to be analyzed
    #[arg(long, default_value = DEFAULT_FIELD, help_heading = "Options")]
    pub field: String,

    /// Input is raw text, not JSON
    #[arg(long, help_heading = "Options")]
    pub raw: bool,

    /// Documents per model call
    #[arg(
        long,
        default_value_t = DEFAULT_BATCH_SIZE,
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize),
        help_heading = "Options"
    )]
    pub batchsize: usize,

    /// What to do with lines that are not valid documents
    #[arg(long, value_enum, default_value = "halt", help_heading = "Options")]
    pub on_malformed: MalformedPolicy,

    /// Hugging Face model id
    #[arg(long, value_name = "ID", help_heading = "Model")]
    pub model: Option<String>,

    /// Load the model from a local directory instead of the hub
    #[arg(long, value_name = "DIR", help_heading = "Model")]
    pub model_dir: Option<PathBuf>,

    /// Never use an accelerator
    #[arg(long, help_heading = "Model")]
    pub cpu: bool,

    /// TOML file with a [classifier] section
    #[arg(long, value_name = "FILE", env = "GLOSSA_CONFIG", help_heading = "Model")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Handling of malformed input lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MalformedPolicy {
    /// Stop at the first malformed line
    Halt,
    /// Log and skip malformed lines
    Skip,
}

impl From<MalformedPolicy> for OnMalformed {
    fn from(policy: MalformedPolicy) -> Self {
        match policy {
            MalformedPolicy::Halt => OnMalformed::Halt,
            MalformedPolicy::Skip => OnMalformed::Skip,
        }
    }
}

impl DomainLabelsArgs {
    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.logging.init()?;
        log::debug!("Arguments: {:?}", self);

        let config = self.classifier_config()?;
        let model = CandleClassifier::from_config(&config)
            .with_context(|| format!("Failed to load classifier {}", config.model_id))?;
        let labeler = DomainLabeler::new(model);

        let reader = open_input(self.input.as_deref())?;
        let writer = open_output(self.output.as_deref())?;
        let stats = classify_stream(&labeler, reader, writer, &self.stream_options())
            .context("Domain labelling failed")?;

        log::info!(
            "Done: {} lines, {} labelled, {} empty, {} malformed",
            stats.lines,
            stats.labelled,
            stats.empty,
            stats.malformed
        );
        Ok(())
    }

    /// Classifier settings from the config file with flags on top
    pub fn classifier_config(&self) -> Result<ClassifierConfig> {
        let mut config = match &self.config {
            Some(path) => ClassifierConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?,
            None => ClassifierConfig::default(),
        };
        if let Some(model) = &self.model {
            config.model_id = model.clone();
        }
        if let Some(dir) = &self.model_dir {
            config.model_dir = Some(dir.clone());
        }
        config.force_cpu |= self.cpu;
        Ok(config)
    }

    pub fn stream_options(&self) -> StreamOptions {
        let input = if self.raw {
            InputMode::Raw
        } else {
            InputMode::Json {
                field: self.field.clone(),
            }
        };
        StreamOptions {
            input,
            batch_size: self.batchsize,
            on_malformed: self.on_malformed.into(),
        }
    }
}
