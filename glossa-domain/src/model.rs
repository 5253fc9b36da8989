//! Sequence classification model seam

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{DomainError, Result};

/// Class index to label name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Id2Label {
    labels: BTreeMap<usize, String>,
}

impl Id2Label {
    /// Labels numbered from zero in iteration order
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .enumerate()
                .map(|(index, label)| (index, label.into()))
                .collect(),
        }
    }

    /// Read the `id2label` object of a Hugging Face `config.json`
    pub fn from_model_config(config: &Value) -> Result<Self> {
        let map = config
            .get("id2label")
            .and_then(Value::as_object)
            .ok_or_else(|| DomainError::ModelLoad("config.json has no id2label".to_string()))?;

        let mut labels = BTreeMap::new();
        for (key, value) in map {
            let index = key.parse::<usize>().map_err(|_| {
                DomainError::ModelLoad(format!("id2label key '{key}' is not a class index"))
            })?;
            let label = value.as_str().ok_or_else(|| {
                DomainError::ModelLoad(format!("id2label value for {index} is not a string"))
            })?;
            labels.insert(index, label.to_string());
        }
        Ok(Self { labels })
    }

    /// Label for a class index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there are no classes
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A model scoring each text against a fixed set of classes
pub trait ClassifierModel {
    /// One row of per-class scores per input text, in input order
    fn logits(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Class names
    fn id2label(&self) -> &Id2Label;
}
