use chrono::{DateTime, Utc};

/// Append-only log entry. `token` is a plain reference: the token may be
/// deleted while its usage history stays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub token: String,
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
}
