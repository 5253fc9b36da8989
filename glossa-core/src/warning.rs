//! Warnings recorded when a language is served by something other than
//! its own tokenizer

use std::fmt;

use crate::backend::wordpunct::WORDPUNCT_ID;

/// Prefix shared by every warning code
pub const WARNING_PREFIX: &str = "warning_tok_";

/// A degradation recorded at binding time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Warning {
    /// A related language's tokenizer was used, e.g. Dutch for Afrikaans
    Substitute { family: String, substitute: String },
    /// The family's backend could not be loaded
    Missing { requirement: String },
    /// A tokenizer known to be approximate was used
    Degraded { backend: String },
}

impl Warning {
    /// The generic tokenizer was used
    pub fn generic() -> Self {
        Warning::Degraded {
            backend: WORDPUNCT_ID.to_string(),
        }
    }

    /// Warning code as written to downstream annotations
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Substitute { family, substitute } => {
                write!(f, "{WARNING_PREFIX}{family}_{substitute}")
            }
            Warning::Missing { requirement } => write!(f, "{WARNING_PREFIX}missing_{requirement}"),
            Warning::Degraded { backend } => write!(f, "{WARNING_PREFIX}{backend}"),
        }
    }
}
