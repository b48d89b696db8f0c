use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{SubsecRound, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::token::Token;

/// Random bytes per token (256 bits of entropy).
pub const TOKEN_BYTES: usize = 32;

/// Shortest value accepted for a bootstrap admin token.
pub const MIN_BOOTSTRAP_TOKEN_LEN: usize = 32;

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait TokenRepoTrait: Send + Sync {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Token>>;

    async fn insert(&self, token: &Token) -> AppResult<()>;

    /// All tokens in storage order.
    async fn list_all(&self) -> AppResult<Vec<Token>>;

    /// Returns `false` when no record matched.
    async fn delete_by_token(&self, token: &str) -> AppResult<bool>;
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct TokenUseCases {
    token_repo: Arc<dyn TokenRepoTrait>,
}

impl TokenUseCases {
    pub fn new(token_repo: Arc<dyn TokenRepoTrait>) -> Self {
        Self { token_repo }
    }

    /// Issue a new token. Callers must already hold an admin token; the HTTP
    /// layer enforces that before this runs.
    pub async fn create_token(&self, is_admin: bool) -> AppResult<Token> {
        let token = Token {
            token: generate_token(),
            is_admin,
            // Storage keeps microseconds; truncate so the returned record
            // matches what a later list reads back.
            created_at: Utc::now().trunc_subsecs(6),
        };

        self.token_repo.insert(&token).await?;

        tracing::info!(
            token = %fingerprint(&token.token),
            is_admin,
            "Token created"
        );
        Ok(token)
    }

    pub async fn list_tokens(&self) -> AppResult<Vec<Token>> {
        self.token_repo.list_all().await
    }

    pub async fn delete_token(&self, raw_token: &str) -> AppResult<()> {
        if !self.token_repo.delete_by_token(raw_token).await? {
            return Err(AppError::NotFound("Token"));
        }

        tracing::info!(token = %fingerprint(raw_token), "Token deleted");
        Ok(())
    }

    /// Resolve a presented bearer credential. `None` means unknown.
    pub async fn authenticate(&self, raw_token: &str) -> AppResult<Option<Token>> {
        if raw_token.is_empty() {
            return Ok(None);
        }
        self.token_repo.find_by_token(raw_token).await
    }

    /// Seed an admin token with a known value so the token routes are
    /// reachable on a fresh database.
    pub async fn ensure_admin_token(&self, raw_token: &str) -> AppResult<()> {
        let raw_token = raw_token.trim();
        if raw_token.len() < MIN_BOOTSTRAP_TOKEN_LEN {
            return Err(AppError::InvalidInput(format!(
                "bootstrap admin token must be at least {MIN_BOOTSTRAP_TOKEN_LEN} characters"
            )));
        }

        match self.token_repo.find_by_token(raw_token).await? {
            Some(existing) if existing.is_admin => {
                tracing::debug!(token = %fingerprint(raw_token), "Bootstrap admin token present");
            }
            Some(_) => {
                tracing::warn!(
                    token = %fingerprint(raw_token),
                    "Bootstrap token exists without admin privileges, leaving it unchanged"
                );
            }
            None => {
                let token = Token {
                    token: raw_token.to_string(),
                    is_admin: true,
                    created_at: Utc::now().trunc_subsecs(6),
                };
                self.token_repo.insert(&token).await?;
                tracing::info!(token = %fingerprint(raw_token), "Bootstrap admin token created");
            }
        }

        Ok(())
    }
}

// ============================================================================
// Token Generation
// ============================================================================

/// Generate a token: 32 random bytes from the OS CSPRNG, base64url without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Short, non-reversible identifier for a token, safe to put in logs.
pub fn fingerprint(raw_token: &str) -> String {
    let hash = Sha256::digest(raw_token.as_bytes());
    hex::encode(&hash[..6])
}
