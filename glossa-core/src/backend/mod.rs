//! Tokenizer backend adapters
//!
//! Every backend library returns its own shape of output. Each adapter
//! turns that into a flat list of token strings; [`finish_tokens`] then
//! drops anything empty or whitespace-only.

use crate::error::BackendResult;
use crate::routing::{BackendKind, FamilyConfig};

pub mod icu;
pub mod jieba;
pub mod pipe;
pub mod shape;
pub mod unicode_words;
pub mod vibrato;
pub mod wordpunct;

pub use pipe::PipeBackend;
pub use unicode_words::UnicodeWordsBackend;
pub use wordpunct::WordPunctBackend;

/// One sentence in, ordered tokens out
pub trait Backend: Send + Sync {
    /// Tokenize a single sentence
    fn tokenize(&self, sentence: &str) -> BackendResult<Vec<String>>;
}

/// Construct the adapter serving `family` for backend parameter `param`
pub fn build(family: &FamilyConfig, param: &str) -> BackendResult<Box<dyn Backend>> {
    let backend: Box<dyn Backend> = match family.backend {
        BackendKind::Wordpunct => Box::new(WordPunctBackend::new()),
        BackendKind::UnicodeWords => Box::new(UnicodeWordsBackend),
        BackendKind::Pipe => Box::new(PipeBackend::spawn(
            substitute_param(&family.command, param),
            family.output,
        )?),
        BackendKind::Vibrato => {
            let dictionary = family.dictionaries.get(param).ok_or_else(|| {
                crate::error::BackendError::Resource {
                    path: String::new(),
                    reason: format!("no dictionary configured for '{param}'"),
                }
            })?;
            vibrato::load(dictionary)?
        }
        BackendKind::Jieba => jieba::load()?,
        BackendKind::Icu => icu::load()?,
    };
    Ok(backend)
}

/// Replace `{lang}` in every argument
fn substitute_param(command: &[String], param: &str) -> Vec<String> {
    command
        .iter()
        .map(|arg| arg.replace("{lang}", param))
        .collect()
}

/// Drop empty and whitespace-only tokens
pub(crate) fn finish_tokens<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tokens
        .into_iter()
        .map(Into::into)
        .filter(|token| !token.trim().is_empty())
        .collect()
}
