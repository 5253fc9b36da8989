//! Per-language tokenizer dispatch
//!
//! Maps a language code to the most appropriate tokenizer backend for it,
//! falling back to a closely related language or to a generic
//! word/punctuation tokenizer, and records a warning for every such
//! degradation.
//!
//! The mapping lives in a declarative routing table (TOML, embedded by
//! default) so that adding a language is a table edit, not a code change.
//!
//! # Example
//!
//! ```rust
//! use glossa_core::TokenizerBinding;
//!
//! let binding = TokenizerBinding::for_language("tlh");
//! assert_eq!(binding.backend_id(), "nltk_wordpunct");
//! assert_eq!(binding.warning_codes(), vec!["warning_tok_nltk_wordpunct"]);
//! assert_eq!(binding.tokenize("Hello, world!"), vec!["Hello", ",", "world", "!"]);
//! ```

pub mod backend;
pub mod binding;
pub mod capability;
pub mod error;
pub mod routing;
pub mod warning;

pub use backend::Backend;
pub use binding::{Selection, TokenizerBinding};
pub use capability::Capabilities;
pub use error::{BackendError, BackendResult, RoutingError};
pub use routing::{
    embedded_table, load_table, load_table_file, BackendKind, FamilyConfig, OutputShape, Route,
    RoutingTable,
};
pub use warning::{Warning, WARNING_PREFIX};
