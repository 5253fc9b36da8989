//! Generic word/punctuation tokenizer
//!
//! Splits on runs of word characters and runs of non-space punctuation,
//! the same pattern as NLTK's `WordPunctTokenizer`. Works for any script
//! that separates words with spaces, so it is the fallback for everything.

use std::sync::OnceLock;

use regex::Regex;

use super::{finish_tokens, Backend};
use crate::error::BackendResult;

/// Identifier of the generic tokenizer
pub const WORDPUNCT_ID: &str = "nltk_wordpunct";

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| Regex::new(r"\w+|[^\w\s]+").expect("static pattern compiles"))
}

/// Regex word/punctuation tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPunctBackend;

impl WordPunctBackend {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }
}

impl Backend for WordPunctBackend {
    fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>> {
        Ok(finish_tokens(
            pattern().find_iter(sentence).map(|m| m.as_str()),
        ))
    }
}
