//! UAX #29 word boundary tokenizer

use unicode_segmentation::UnicodeSegmentation;

use super::{finish_tokens, Backend};
use crate::error::BackendResult;

/// Splits on Unicode word boundaries, keeping punctuation as tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordsBackend;

impl Backend for UnicodeWordsBackend {
    fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>> {
        Ok(finish_tokens(sentence.split_word_bounds()))
    }
}
