use std::sync::Arc;

use crate::{
    app_error::AppResult,
    application::{
        ports::classifier::Classifier,
        use_cases::{token::fingerprint, usage::UsageLogger},
    },
    domain::entities::{safety_report::SafetyReport, token::Token},
};

/// Endpoint name written to usage records for moderation calls.
pub const MODERATE_ENDPOINT: &str = "/moderate";

#[derive(Clone)]
pub struct ModerationUseCases {
    classifier: Arc<dyn Classifier>,
    usage: UsageLogger,
}

impl ModerationUseCases {
    pub fn new(classifier: Arc<dyn Classifier>, usage: UsageLogger) -> Self {
        Self { classifier, usage }
    }

    /// Classify an upload on behalf of an authenticated caller.
    ///
    /// Usage is recorded before classification, so a failing classifier still
    /// leaves a usage record behind.
    pub async fn moderate(&self, caller: &Token, content: &[u8]) -> AppResult<SafetyReport> {
        self.usage.record(&caller.token, MODERATE_ENDPOINT);

        let report = self.classifier.classify(content).await?;

        tracing::debug!(
            token = %fingerprint(&caller.token),
            size_bytes = content.len(),
            categories = report.categories.len(),
            "Upload classified"
        );
        Ok(report)
    }
}
