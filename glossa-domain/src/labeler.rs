//! Batch domain labelling

use crate::error::{DomainError, Result};
use crate::model::ClassifierModel;

/// Assigns one domain label per non-empty text
pub struct DomainLabeler<M> {
    model: M,
}

impl<M: ClassifierModel> DomainLabeler<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// The underlying model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Label a batch
    ///
    /// Missing and empty texts are dropped first; the result holds one
    /// label per remaining text, in order. The model is not called when
    /// nothing remains.
    pub fn label_batch(&self, texts: &[Option<&str>]) -> Result<Vec<String>> {
        let kept: Vec<&str> = texts
            .iter()
            .filter_map(|text| *text)
            .filter(|text| !text.is_empty())
            .collect();
        if kept.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.model.logits(&kept)?;
        if rows.len() != kept.len() {
            return Err(DomainError::RowCount {
                expected: kept.len(),
                got: rows.len(),
            });
        }

        let id2label = self.model.id2label();
        rows.iter()
            .map(|row| {
                let index = argmax(row)
                    .ok_or_else(|| DomainError::Inference("empty score row".to_string()))?;
                id2label
                    .get(index)
                    .map(str::to_string)
                    .ok_or(DomainError::UnknownClass(index))
            })
            .collect()
    }
}

/// Index of the highest score; ties go to the lowest index
pub(crate) fn argmax(row: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in row.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
