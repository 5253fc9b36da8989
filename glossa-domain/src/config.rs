//! Classifier configuration
//!
//! Read from the `[classifier]` section of a TOML file; every key is
//! optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Model used when none is configured
pub const DEFAULT_MODEL_ID: &str = "EuropeanParliament/eurovoc_2025";

/// Longest input, in model tokens, before truncation
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Hugging Face model id
    pub model_id: String,

    /// Directory holding `config.json`, `tokenizer.json` and
    /// `model.safetensors`; skips the hub download when set
    pub model_dir: Option<PathBuf>,

    /// Truncation length in tokens
    pub max_length: usize,

    /// Never use an accelerator
    pub force_cpu: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_dir: None,
            max_length: DEFAULT_MAX_LENGTH,
            force_cpu: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    classifier: ClassifierConfig,
}

impl ClassifierConfig {
    /// Parse the `[classifier]` section of a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)?;
        file.classifier.validated()
    }

    /// Read the `[classifier]` section of a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)?;
        log::debug!("Loading classifier configuration from {}", path.display());
        Self::from_toml_str(&toml_str)
    }

    fn validated(self) -> Result<Self> {
        if self.max_length == 0 {
            return Err(DomainError::ModelLoad(
                "max_length must be at least 1".to_string(),
            ));
        }
        if self.model_id.trim().is_empty() && self.model_dir.is_none() {
            return Err(DomainError::ModelLoad("model_id is empty".to_string()));
        }
        Ok(self)
    }
}
