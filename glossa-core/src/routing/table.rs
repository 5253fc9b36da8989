//! Runtime lookup over a validated routing configuration

use std::collections::HashMap;

use super::config::{FamilyConfig, RoutingConfig};
use crate::error::RoutingError;

/// Outcome of looking a language code up in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// The family serves the code natively
    Native {
        family: &'a FamilyConfig,
        param: String,
    },
    /// The family serves the code through a substitute language
    Substitute {
        family: &'a FamilyConfig,
        substitute: &'a str,
        param: String,
    },
    /// No family knows the code
    Default,
}

impl<'a> Route<'a> {
    /// The family selected, if any
    pub fn family(&self) -> Option<&'a FamilyConfig> {
        match self {
            Route::Native { family, .. } | Route::Substitute { family, .. } => Some(family),
            Route::Default => None,
        }
    }
}

/// Validated routing table with precomputed lookups
#[derive(Debug, Clone)]
pub struct RoutingTable {
    config: RoutingConfig,
    native: HashMap<String, usize>,
    substitutes: HashMap<String, (usize, String)>,
}

impl RoutingTable {
    /// Build from configuration
    pub fn from_config(config: RoutingConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::Invalid)?;

        let mut native = HashMap::new();
        let mut substitutes = HashMap::new();
        for (index, family) in config.families.iter().enumerate() {
            for code in &family.languages {
                native.insert(code.clone(), index);
            }
            for (code, substitute) in &family.fallback {
                // earlier families win
                substitutes
                    .entry(code.clone())
                    .or_insert_with(|| (index, substitute.clone()));
            }
        }

        Ok(Self {
            config,
            native,
            substitutes,
        })
    }

    /// Families in table order
    pub fn families(&self) -> &[FamilyConfig] {
        &self.config.families
    }

    /// Look up a language code
    ///
    /// Native matches take precedence over substitutes regardless of the
    /// order in which families are declared.
    pub fn resolve(&self, code: &str) -> Route<'_> {
        let code = code.trim();

        if let Some(&index) = self.native.get(code) {
            let family = &self.config.families[index];
            return Route::Native {
                family,
                param: family.param_for(code),
            };
        }

        if let Some((index, substitute)) = self.substitutes.get(code) {
            let family = &self.config.families[*index];
            return Route::Substitute {
                family,
                substitute: substitute.as_str(),
                param: family.param_for(substitute),
            };
        }

        Route::Default
    }

    /// Every code the table knows, natives before substitutes, in table order
    pub fn known_languages(&self) -> Vec<&str> {
        let families = &self.config.families;
        let mut seen = std::collections::HashSet::new();
        families
            .iter()
            .flat_map(|family| family.languages.iter())
            .chain(families.iter().flat_map(|family| family.fallback.keys()))
            .map(String::as_str)
            .filter(|code| seen.insert(*code))
            .collect()
    }
}
