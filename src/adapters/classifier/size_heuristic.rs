use async_trait::async_trait;

use crate::{
    app_error::AppResult,
    application::ports::classifier::Classifier,
    domain::entities::safety_report::{SafetyCategory, SafetyReport},
};

/// Uploads strictly larger than 1024 KiB are flagged.
pub const LARGE_UPLOAD_THRESHOLD_BYTES: usize = 1024 * 1024;

/// Placeholder policy that looks only at payload size. It stands in for a
/// real model and makes no attempt to inspect the content.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeHeuristicClassifier;

impl SizeHeuristicClassifier {
    pub fn report_for_len(len: usize) -> SafetyReport {
        if len > LARGE_UPLOAD_THRESHOLD_BYTES {
            SafetyReport::new(vec![
                SafetyCategory::new("Graphic Violence", 0.75),
                SafetyCategory::new("Hate Symbols", 0.25),
            ])
        } else {
            SafetyReport::new(vec![SafetyCategory::new("Safe", 0.99)])
        }
    }
}

#[async_trait]
impl Classifier for SizeHeuristicClassifier {
    async fn classify(&self, content: &[u8]) -> AppResult<SafetyReport> {
        Ok(Self::report_for_len(content.len()))
    }
}
