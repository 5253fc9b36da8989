//! Backend capability probing
//!
//! Availability of every backend a routing table names is probed once and
//! kept as a static table, so binding a language never retries a failed
//! load and the fallback decision can be replayed in tests.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::sync::OnceLock;

use crate::routing::{embedded_table, BackendKind, RoutingTable};

/// Requirement name -> available
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    available: BTreeMap<String, bool>,
}

static PROBED: OnceLock<Capabilities> = OnceLock::new();

impl Capabilities {
    /// Probe every requirement of a routing table
    pub fn probe(table: &RoutingTable) -> Self {
        let mut available = BTreeMap::new();

        for family in table.families() {
            let Some(requirement) = family.requirement() else {
                continue;
            };
            if available.contains_key(&requirement) {
                continue;
            }
            let present = match family.backend {
                BackendKind::Pipe => family
                    .command
                    .first()
                    .is_some_and(|program| program_on_path(program)),
                BackendKind::Vibrato => cfg!(feature = "mecab"),
                BackendKind::Jieba => cfg!(feature = "jieba"),
                BackendKind::Icu => cfg!(feature = "icu"),
                BackendKind::Wordpunct | BackendKind::UnicodeWords => true,
            };
            log::debug!("Capability {requirement}: {present}");
            available.insert(requirement, present);
        }

        Self { available }
    }

    /// Probe result for the embedded table, computed on first use
    pub fn embedded() -> &'static Capabilities {
        PROBED.get_or_init(|| match embedded_table() {
            Ok(table) => Self::probe(table),
            Err(e) => {
                log::error!("Cannot probe backends: {e}");
                Self::default()
            }
        })
    }

    /// Capabilities with exactly the given requirements available
    pub fn with_available<I, S>(requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: requirements
                .into_iter()
                .map(|name| (name.into(), true))
                .collect(),
        }
    }

    /// Mark a requirement as present or missing
    pub fn set(&mut self, requirement: impl Into<String>, present: bool) {
        self.available.insert(requirement.into(), present);
    }

    /// Whether a requirement is satisfied; `None` means nothing is required
    pub fn is_available(&self, requirement: Option<&str>) -> bool {
        match requirement {
            None => true,
            Some(name) => self.available.get(name).copied().unwrap_or(false),
        }
    }

    /// Requirements and their status, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.available
            .iter()
            .map(|(name, present)| (name.as_str(), *present))
    }
}

/// Whether a program can be executed, either as a path or through `PATH`
pub(crate) fn program_on_path(program: &str) -> bool {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::load_table;

    #[test]
    fn test_with_available() {
        let caps = Capabilities::with_available(["jieba"]);
        assert!(caps.is_available(Some("jieba")));
        assert!(!caps.is_available(Some("vibrato")));
        assert!(caps.is_available(None));
    }

    #[test]
    fn test_set_overrides() {
        let mut caps = Capabilities::with_available(["jieba"]);
        caps.set("jieba", false);
        assert!(!caps.is_available(Some("jieba")));
    }

    #[test]
    fn test_probe_pipe_programs() {
        let table = load_table(
            r#"
            [[family]]
            name = "present"
            backend = "pipe"
            command = ["sh", "-c", "cat"]
            languages = ["aa"]

            [[family]]
            name = "absent"
            backend = "pipe"
            command = ["glossa-definitely-not-installed"]
            languages = ["bb"]

            [[family]]
            name = "plain"
            backend = "wordpunct"
            languages = ["cc"]
            "#,
        )
        .unwrap();

        let caps = Capabilities::probe(&table);
        assert!(caps.is_available(Some("sh")));
        assert!(!caps.is_available(Some("glossa-definitely-not-installed")));
        assert_eq!(caps.iter().count(), 2);
    }

    #[test]
    fn test_probe_native_follows_features() {
        let table = load_table(
            r#"
            [[family]]
            name = "jieba"
            backend = "jieba"
            languages = ["zh"]
            "#,
        )
        .unwrap();
        let caps = Capabilities::probe(&table);
        assert_eq!(caps.is_available(Some("jieba")), cfg!(feature = "jieba"));
    }

    #[test]
    fn test_program_on_path_with_directory() {
        assert!(program_on_path("/bin/sh"));
        assert!(!program_on_path("/nonexistent/tool"));
    }
}
