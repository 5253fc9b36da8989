//! Batch domain classification and label statistics
//!
//! A [`DomainLabeler`] assigns each document the highest-scoring class of a
//! sequence-classification model (by default `EuropeanParliament/eurovoc_2025`,
//! run through candle). [`classify_stream`] drives it over a line-oriented
//! corpus, and the [`stats`] module reduces the resulting label counts into
//! a YAML stats entry.

#[cfg(feature = "candle")]
pub mod candle;
pub mod config;
pub mod error;
pub mod labeler;
pub mod model;
pub mod stats;
pub mod stream;

#[cfg(feature = "candle")]
pub use candle::{select_device, CandleClassifier, ModelFiles};
pub use config::{ClassifierConfig, DEFAULT_MAX_LENGTH, DEFAULT_MODEL_ID};
pub use error::{DomainError, Result};
pub use labeler::DomainLabeler;
pub use model::{ClassifierModel, Id2Label};
pub use stats::{
    append_domain_labels, domain_labels_document, read_label_counts, LabelCounts,
    DOMAIN_LABELS_KEY,
};
pub use stream::{
    classify_stream, InputMode, OnMalformed, StreamOptions, StreamStats, DEFAULT_BATCH_SIZE,
    DEFAULT_FIELD,
};
