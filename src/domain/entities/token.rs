use chrono::{DateTime, Utc};

/// A bearer credential. The token string is both identifier and secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
