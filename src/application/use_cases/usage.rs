//! Usage logging off the request path.
//!
//! Handlers call [`UsageLogger::record`], which timestamps the record and hands
//! it to a bounded channel without waiting. When the channel is full the send
//! moves to a spawned task that waits for room, so a burst delays records
//! rather than losing them. A single [`UsageWriter`] task owns the receiving
//! end and appends records to storage. Storage failures never reach the
//! caller; they are reported through tracing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::app_error::AppResult;
use crate::application::use_cases::token::fingerprint;
use crate::domain::entities::usage_record::UsageRecord;

#[async_trait]
pub trait UsageRepoTrait: Send + Sync {
    async fn insert(&self, record: &UsageRecord) -> AppResult<()>;
}

/// Create a connected logger/writer pair. `capacity` bounds the number of
/// records waiting to be written.
pub fn usage_channel(
    usage_repo: Arc<dyn UsageRepoTrait>,
    capacity: usize,
) -> (UsageLogger, UsageWriter) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (UsageLogger { tx }, UsageWriter { rx, usage_repo })
}

#[derive(Clone)]
pub struct UsageLogger {
    tx: mpsc::Sender<UsageRecord>,
}

impl UsageLogger {
    /// Queue one usage record stamped with the current UTC time.
    ///
    /// Never waits. Must be called inside a Tokio runtime.
    pub fn record(&self, token: &str, endpoint: &str) {
        let record = UsageRecord {
            token: token.to_string(),
            endpoint: endpoint.to_string(),
            timestamp: Utc::now(),
        };

        match self.tx.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                tracing::debug!(
                    token = %fingerprint(&record.token),
                    endpoint = %record.endpoint,
                    "Usage queue full, deferring record"
                );
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    if let Err(err) = tx.send(record).await {
                        tracing::warn!(
                            token = %fingerprint(&err.0.token),
                            endpoint = %err.0.endpoint,
                            "Usage writer stopped, dropping record"
                        );
                    }
                });
            }
            Err(TrySendError::Closed(record)) => {
                tracing::warn!(
                    token = %fingerprint(&record.token),
                    endpoint = %record.endpoint,
                    "Usage writer stopped, dropping record"
                );
            }
        }
    }
}

pub struct UsageWriter {
    rx: mpsc::Receiver<UsageRecord>,
    usage_repo: Arc<dyn UsageRepoTrait>,
}

impl UsageWriter {
    /// Write records until every [`UsageLogger`] is dropped and the queue is empty.
    pub async fn run(mut self) {
        tracing::info!("Usage writer started");

        while let Some(record) = self.rx.recv().await {
            if let Err(err) = self.usage_repo.insert(&record).await {
                tracing::error!(
                    error = %err,
                    token = %fingerprint(&record.token),
                    endpoint = %record.endpoint,
                    "Failed to write usage record"
                );
            }
        }

        tracing::info!("Usage writer drained, exiting");
    }
}
