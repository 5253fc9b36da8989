//! Configuration structures and validation
//!
//! This module defines the TOML schema for the routing table.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Root routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(rename = "family")]
    pub families: Vec<FamilyConfig>,
}

/// Kind of adapter a family is served by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// `\w+|[^\w\s]+` regex tokenizer
    Wordpunct,
    /// UAX #29 word boundaries
    UnicodeWords,
    /// External program over a line protocol
    Pipe,
    /// MeCab-compatible lattice tokenizer
    Vibrato,
    /// Chinese word segmentation
    Jieba,
    /// ICU dictionary/LSTM word segmenter
    Icu,
}

impl BackendKind {
    /// Name of the capability this kind depends on, when it has one
    pub fn default_requirement(self) -> Option<&'static str> {
        match self {
            BackendKind::Wordpunct | BackendKind::UnicodeWords | BackendKind::Pipe => None,
            BackendKind::Vibrato => Some("vibrato"),
            BackendKind::Jieba => Some("jieba"),
            BackendKind::Icu => Some("icu_segmenter"),
        }
    }
}

/// Shape of the replies a pipe backend writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    /// One line of whitespace-separated tokens
    #[default]
    Tokens,
    /// `id\ttoken` lines, possibly in several blank-separated sentences,
    /// closed by a `#END` line
    Conll,
    /// One JSON array per line
    Json,
}

/// One row of the routing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    pub name: String,
    pub backend: BackendKind,
    pub languages: Vec<String>,
    /// Backend parameter per language code; defaults to the code itself
    #[serde(default)]
    pub params: HashMap<String, String>,
    /// Substitute codes for languages this family can serve approximately
    #[serde(default)]
    pub fallback: BTreeMap<String, String>,
    #[serde(default)]
    pub qualify: bool,
    #[serde(default)]
    pub warn: bool,
    pub requires: Option<String>,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub output: OutputShape,
    #[serde(default)]
    pub dictionaries: HashMap<String, String>,
}

impl FamilyConfig {
    /// Backend parameter for a native language code
    pub fn param_for(&self, code: &str) -> String {
        self.params
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    /// Backend identifier for a given parameter
    pub fn backend_id(&self, param: &str) -> String {
        if self.qualify {
            format!("{}_{}", self.name, param)
        } else {
            self.name.clone()
        }
    }

    /// Capability name this family needs at runtime
    pub fn requirement(&self) -> Option<String> {
        if let Some(explicit) = &self.requires {
            return Some(explicit.clone());
        }
        match self.backend {
            BackendKind::Pipe => self.command.first().map(|program| program_name(program)),
            kind => kind.default_requirement().map(str::to_string),
        }
    }
}

/// File name of a program, without its directory
fn program_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}

impl RoutingConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        let mut native: HashMap<&str, &str> = HashMap::new();

        for family in &self.families {
            if family.name.is_empty() {
                return Err("family with empty name".to_string());
            }
            if !names.insert(family.name.as_str()) {
                return Err(format!("duplicate family '{}'", family.name));
            }
            if family.backend == BackendKind::Pipe && family.command.is_empty() {
                return Err(format!("pipe family '{}' has no command", family.name));
            }

            for code in &family.languages {
                if let Some(owner) = native.insert(code.as_str(), family.name.as_str()) {
                    return Err(format!(
                        "language '{code}' is served by both '{owner}' and '{}'",
                        family.name
                    ));
                }
            }

            for (code, substitute) in &family.fallback {
                if !family.languages.contains(substitute) {
                    return Err(format!(
                        "fallback {code} -> {substitute} in '{}' targets a language the family does not serve",
                        family.name
                    ));
                }
            }
        }

        Ok(())
    }
}
