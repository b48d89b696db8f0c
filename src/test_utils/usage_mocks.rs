use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::usage::UsageRepoTrait,
    domain::entities::usage_record::UsageRecord,
};

const WAIT_STEP: Duration = Duration::from_millis(10);
const WAIT_ATTEMPTS: usize = 200;
const SETTLE: Duration = Duration::from_millis(100);

/// In-memory implementation of UsageRepoTrait.
#[derive(Default)]
pub struct InMemoryUsageRepo {
    pub records: Mutex<Vec<UsageRecord>>,
}

impl InMemoryUsageRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<UsageRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Records are written by a background task; poll until at least
    /// `expected` have landed or the wait budget (~2s) runs out.
    pub async fn wait_for_records(&self, expected: usize) -> Vec<UsageRecord> {
        for _ in 0..WAIT_ATTEMPTS {
            let records = self.records();
            if records.len() >= expected {
                return records;
            }
            tokio::time::sleep(WAIT_STEP).await;
        }
        self.records()
    }

    /// Wait for `expected` records, then give the writer time to land any
    /// extras. Use this to assert an exact count, including zero.
    pub async fn settled_records(&self, expected: usize) -> Vec<UsageRecord> {
        self.wait_for_records(expected).await;
        tokio::time::sleep(SETTLE).await;
        self.records()
    }
}

#[async_trait]
impl UsageRepoTrait for InMemoryUsageRepo {
    async fn insert(&self, record: &UsageRecord) -> AppResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Every insert fails as if the database were unreachable.
#[derive(Default)]
pub struct UnavailableUsageRepo;

#[async_trait]
impl UsageRepoTrait for UnavailableUsageRepo {
    async fn insert(&self, _record: &UsageRecord) -> AppResult<()> {
        Err(AppError::Database("connection refused".into()))
    }
}
