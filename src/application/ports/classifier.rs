//! Boundary between the moderation endpoint and whatever produces the verdict.
//!
//! The HTTP layer, auth and usage logging only ever see this trait, so a real
//! model can replace the built-in heuristic without touching them.

use async_trait::async_trait;

use crate::{app_error::AppResult, domain::entities::safety_report::SafetyReport};

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify raw upload bytes.
    ///
    /// Categories are returned in order of relevance, each with a confidence
    /// in `[0, 1]`.
    async fn classify(&self, content: &[u8]) -> AppResult<SafetyReport>;
}
