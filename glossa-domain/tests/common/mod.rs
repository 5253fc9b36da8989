#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use glossa_domain::{ClassifierModel, Id2Label, Result};

/// Scores a text by keyword hits and remembers every call
pub struct KeywordModel {
    keywords: Vec<&'static str>,
    id2label: Id2Label,
    pub calls: Cell<usize>,
    pub seen: RefCell<Vec<String>>,
}

impl KeywordModel {
    /// One class per keyword, labelled by the keyword itself
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            id2label: Id2Label::from_labels(keywords.iter().copied()),
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ClassifierModel for KeywordModel {
    fn logits(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.calls.set(self.calls.get() + 1);
        self.seen
            .borrow_mut()
            .extend(texts.iter().map(|text| text.to_string()));
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                self.keywords
                    .iter()
                    .map(|keyword| lower.matches(keyword).count() as f32)
                    .collect()
            })
            .collect())
    }

    fn id2label(&self) -> &Id2Label {
        &self.id2label
    }
}
