//! CLI command implementations
//!
//! Each binary parses one of these argument sets and calls `execute`.

#[cfg(feature = "candle")]
pub mod domainlabels;
pub mod tokenize;
pub mod write_domainlabels;

#[cfg(feature = "candle")]
pub use domainlabels::DomainLabelsArgs;
pub use tokenize::TokenizeArgs;
pub use write_domainlabels::WriteDomainLabelsArgs;
