use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::classifier::Classifier,
    domain::entities::safety_report::SafetyReport,
    infra::http_client::try_build_client,
};

/// Delegates classification to an external HTTP service.
///
/// The raw upload is POSTed as `application/octet-stream`; the service answers
/// with `{"categories": [{"category": ..., "confidence": ...}]}`.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: Client,
    endpoint: Url,
}

impl RemoteClassifier {
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: try_build_client()?,
            endpoint,
        })
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, content: &[u8]) -> AppResult<SafetyReport> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(content.to_vec())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("classifier request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "classifier responded with {status}"
            )));
        }

        let report: SafetyReport = resp
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("invalid classifier response: {e}")))?;

        if let Some(bad) = report.categories.iter().find(|c| !c.has_valid_confidence()) {
            return Err(AppError::Internal(format!(
                "classifier returned confidence {} for {:?}",
                bad.confidence, bad.category
            )));
        }

        Ok(report)
    }
}
