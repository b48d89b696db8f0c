use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyCategory {
    pub category: String,
    pub confidence: f64,
}

impl SafetyCategory {
    pub fn new(category: impl Into<String>, confidence: f64) -> Self {
        Self {
            category: category.into(),
            confidence,
        }
    }

    pub fn has_valid_confidence(&self) -> bool {
        (0.0..=1.0).contains(&self.confidence)
    }
}

/// Ordered classification result for a single upload. Never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SafetyReport {
    pub categories: Vec<SafetyCategory>,
}

impl SafetyReport {
    pub fn new(categories: Vec<SafetyCategory>) -> Self {
        Self { categories }
    }
}
