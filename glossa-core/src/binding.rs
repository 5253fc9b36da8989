//! Language code to tokenizer binding
//!
//! A [`TokenizerBinding`] is decided once per language code and never
//! changes afterwards. Selection works in this order:
//!
//! 1. the routing table is consulted: native codes first, then
//!    substitutes;
//! 2. an unknown code gets the generic tokenizer and a single
//!    `warning_tok_nltk_wordpunct`;
//! 3. a family whose backend is missing, or fails to load, is replaced by
//!    the generic tokenizer with `warning_tok_missing_<requirement>`
//!    followed by `warning_tok_nltk_wordpunct`.
//!
//! [`TokenizerBinding::select`] applies the same policy from the probed
//! capabilities alone, without starting or loading any backend.
//!
//! Tokenizing never fails from the caller's point of view: a backend
//! error or panic is logged together with the sentence and an empty token
//! list is returned.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::backend::wordpunct::WORDPUNCT_ID;
use crate::backend::{self, Backend, WordPunctBackend};
use crate::capability::Capabilities;
use crate::routing::{embedded_table, FamilyConfig, Route, RoutingTable};
use crate::warning::Warning;

/// Tokenizer bound to one language code
pub struct TokenizerBinding {
    language: String,
    backend_id: String,
    backend: Box<dyn Backend>,
    warnings: Vec<Warning>,
}

/// Outcome of the selection policy for one code, before anything is loaded
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub language: String,
    pub backend_id: String,
    pub warnings: Vec<Warning>,
    /// Family and backend parameter to load; `None` for the generic tokenizer
    load: Option<(&'a FamilyConfig, String)>,
}

impl Selection<'_> {
    fn generic(language: String, warnings: Vec<Warning>) -> Self {
        Self {
            language,
            backend_id: WORDPUNCT_ID.to_string(),
            warnings,
            load: None,
        }
    }

    fn missing(language: String, family: &FamilyConfig) -> Self {
        let requirement = family.requirement().unwrap_or_else(|| family.name.clone());
        log::info!("Tokenizer '{}' unavailable ({requirement}), using {WORDPUNCT_ID}", family.name);
        Self::generic(
            language,
            vec![Warning::Missing { requirement }, Warning::generic()],
        )
    }
}

impl TokenizerBinding {
    /// Decide which tokenizer `code` gets without starting or loading it
    pub fn select<'a>(
        code: &str,
        table: &'a RoutingTable,
        capabilities: &Capabilities,
    ) -> Selection<'a> {
        let language = code.trim().to_string();

        let (family, param, substitute) = match table.resolve(&language) {
            Route::Default => {
                log::debug!("No tokenizer for '{language}', using {WORDPUNCT_ID}");
                return Selection::generic(language, vec![Warning::generic()]);
            }
            Route::Native { family, param } => (family, param, None),
            Route::Substitute {
                family,
                substitute,
                param,
            } => (family, param, Some(substitute)),
        };

        if !capabilities.is_available(family.requirement().as_deref()) {
            return Selection::missing(language, family);
        }

        let backend_id = family.backend_id(&param);
        let mut warnings = Vec::new();
        if let Some(substitute) = substitute {
            warnings.push(Warning::Substitute {
                family: family.name.clone(),
                substitute: substitute.to_string(),
            });
        }
        if family.warn {
            warnings.push(Warning::Degraded {
                backend: backend_id.clone(),
            });
        }

        Selection {
            language,
            backend_id,
            warnings,
            load: Some((family, param)),
        }
    }

    /// Bind `code` using the given table and capabilities
    pub fn new(code: &str, table: &RoutingTable, capabilities: &Capabilities) -> Self {
        let selection = Self::select(code, table, capabilities);
        let Some((family, param)) = selection.load else {
            return Self::generic(selection.language, selection.warnings);
        };

        match backend::build(family, &param) {
            Ok(backend) => {
                log::debug!("Bound '{}' to {}", selection.language, selection.backend_id);
                Self {
                    language: selection.language,
                    backend_id: selection.backend_id,
                    backend,
                    warnings: selection.warnings,
                }
            }
            Err(e) => {
                log::warn!(
                    "Cannot load tokenizer '{}' for '{}': {e}",
                    family.name,
                    selection.language
                );
                let fallback = Selection::missing(selection.language, family);
                Self::generic(fallback.language, fallback.warnings)
            }
        }
    }

    /// Bind `code` using the embedded table and the probed capabilities
    pub fn for_language(code: &str) -> Self {
        match embedded_table() {
            Ok(table) => Self::new(code, table, Capabilities::embedded()),
            Err(e) => {
                log::error!("Embedded routing table unusable: {e}");
                Self::generic(code.trim().to_string(), vec![Warning::generic()])
            }
        }
    }

    fn generic(language: String, warnings: Vec<Warning>) -> Self {
        Self {
            language,
            backend_id: WORDPUNCT_ID.to_string(),
            backend: Box::new(WordPunctBackend::new()),
            warnings,
        }
    }

    /// Language code this binding was created for
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Identifier of the backend in use
    pub fn backend_id(&self) -> &str {
        &self.backend_id
    }

    /// Warnings recorded when the binding was created, in order
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Warning codes, in order
    pub fn warning_codes(&self) -> Vec<String> {
        self.warnings.iter().map(Warning::code).collect()
    }

    /// Tokenize one sentence; failures yield an empty list
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        if sentence.trim().is_empty() {
            return Vec::new();
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.backend.tokenize(sentence))) {
            Ok(Ok(tokens)) => tokens,
            Ok(Err(e)) => {
                log::error!("Failed at tokenizing: {sentence} ({}: {e})", self.backend_id);
                Vec::new()
            }
            Err(_) => {
                log::error!("Failed at tokenizing: {sentence} ({} panicked)", self.backend_id);
                Vec::new()
            }
        }
    }
}

impl fmt::Debug for TokenizerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerBinding")
            .field("language", &self.language)
            .field("backend_id", &self.backend_id)
            .field("warnings", &self.warnings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::load_table;

    fn table() -> RoutingTable {
        load_table(
            r#"
            [[family]]
            name = "echo"
            backend = "pipe"
            command = ["cat"]
            languages = ["en", "nl"]
            [family.fallback]
            af = "nl"

            [[family]]
            name = "nltk_wordpunct"
            backend = "wordpunct"
            warn = true
            languages = ["vi"]

            [[family]]
            name = "broken"
            backend = "pipe"
            command = ["glossa-definitely-not-installed"]
            languages = ["xx"]
            [family.fallback]
            yy = "xx"
            "#,
        )
        .unwrap()
    }

    fn codes(binding: &TokenizerBinding) -> Vec<String> {
        binding.warning_codes()
    }

    #[test]
    fn test_native_binding() {
        let table = table();
        let binding = TokenizerBinding::new("en", &table, &Capabilities::probe(&table));
        assert_eq!(binding.backend_id(), "echo");
        assert!(binding.warnings().is_empty());
        assert_eq!(binding.tokenize("a , b"), vec!["a", ",", "b"]);
    }

    #[test]
    fn test_substitute_binding() {
        let table = table();
        let binding = TokenizerBinding::new("af", &table, &Capabilities::probe(&table));
        assert_eq!(binding.backend_id(), "echo");
        assert_eq!(binding.language(), "af");
        assert_eq!(codes(&binding), vec!["warning_tok_echo_nl"]);
    }

    #[test]
    fn test_warn_family() {
        let table = table();
        let binding = TokenizerBinding::new("vi", &table, &Capabilities::probe(&table));
        assert_eq!(binding.backend_id(), WORDPUNCT_ID);
        assert_eq!(codes(&binding), vec!["warning_tok_nltk_wordpunct"]);
    }

    #[test]
    fn test_unknown_code() {
        let table = table();
        let binding = TokenizerBinding::new("tlh", &table, &Capabilities::probe(&table));
        assert_eq!(binding.backend_id(), WORDPUNCT_ID);
        assert_eq!(codes(&binding), vec!["warning_tok_nltk_wordpunct"]);
        assert_eq!(binding.tokenize("Qapla'!"), vec!["Qapla", "'!"]);
    }

    #[test]
    fn test_missing_backend_drops_substitute_warning() {
        let table = table();
        let binding = TokenizerBinding::new("yy", &table, &Capabilities::probe(&table));
        assert_eq!(binding.backend_id(), WORDPUNCT_ID);
        assert_eq!(
            codes(&binding),
            vec![
                "warning_tok_missing_glossa-definitely-not-installed",
                "warning_tok_nltk_wordpunct"
            ]
        );
    }

    #[test]
    fn test_capabilities_decide_before_loading() {
        let table = table();
        let mut caps = Capabilities::probe(&table);
        caps.set("cat", false);
        let binding = TokenizerBinding::new("en", &table, &caps);
        assert_eq!(
            codes(&binding),
            vec!["warning_tok_missing_cat", "warning_tok_nltk_wordpunct"]
        );
    }

    #[test]
    fn test_load_failure_falls_back() {
        // claimed available, but the program cannot be started
        let table = table();
        let caps = Capabilities::with_available(["glossa-definitely-not-installed"]);
        let binding = TokenizerBinding::new("xx", &table, &caps);
        assert_eq!(binding.backend_id(), WORDPUNCT_ID);
        assert_eq!(binding.warnings().len(), 2);
    }

    #[test]
    fn test_selection_matches_binding() {
        let table = table();
        let caps = Capabilities::probe(&table);
        for code in ["en", "af", "vi", "tlh", "yy"] {
            let selection = TokenizerBinding::select(code, &table, &caps);
            let binding = TokenizerBinding::new(code, &table, &caps);
            assert_eq!(selection.backend_id, binding.backend_id(), "code {code}");
            assert_eq!(selection.warnings, binding.warnings(), "code {code}");
        }
    }

    #[test]
    fn test_selection_does_not_load() {
        // claimed available, so only loading would reveal it is not
        let table = table();
        let caps = Capabilities::with_available(["glossa-definitely-not-installed"]);
        let selection = TokenizerBinding::select("xx", &table, &caps);
        assert_eq!(selection.backend_id, "broken");
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn test_blank_sentences() {
        let table = table();
        let binding = TokenizerBinding::new("en", &table, &Capabilities::probe(&table));
        assert!(binding.tokenize("").is_empty());
        assert!(binding.tokenize("  \n").is_empty());
    }

    struct Exploding;

    impl Backend for Exploding {
        fn tokenize(&self, _sentence: &str) -> crate::error::BackendResult<Vec<String>> {
            panic!("tokenizer blew up")
        }
    }

    struct Failing;

    impl Backend for Failing {
        fn tokenize(&self, _sentence: &str) -> crate::error::BackendResult<Vec<String>> {
            Err(crate::error::BackendError::Closed)
        }
    }

    #[test]
    fn test_backend_failures_yield_empty() {
        for backend in [Box::new(Exploding) as Box<dyn Backend>, Box::new(Failing)] {
            let binding = TokenizerBinding {
                language: "en".to_string(),
                backend_id: "test".to_string(),
                backend,
                warnings: Vec::new(),
            };
            assert!(binding.tokenize("some sentence").is_empty());
        }
    }
}
