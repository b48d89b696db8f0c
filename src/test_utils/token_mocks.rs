use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::token::TokenRepoTrait,
    domain::entities::token::Token,
};

// ============================================================================
// InMemoryTokenRepo
// ============================================================================

/// In-memory implementation of TokenRepoTrait. A `Vec` keeps insertion order
/// as storage order.
#[derive(Default)]
pub struct InMemoryTokenRepo {
    pub tokens: Mutex<Vec<Token>>,
}

impl InMemoryTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Mutex::new(tokens),
        }
    }

    pub fn push(&self, token: Token) {
        self.tokens.lock().unwrap().push(token);
    }

    pub fn snapshot(&self) -> Vec<Token> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenRepoTrait for InMemoryTokenRepo {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Token>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn insert(&self, token: &Token) -> AppResult<()> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.iter().any(|t| t.token == token.token) {
            return Err(AppError::InvalidInput(
                "A record with this value already exists".into(),
            ));
        }
        tokens.push(token.clone());
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Token>> {
        Ok(self.snapshot())
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.token != token);
        Ok(tokens.len() != before)
    }
}

// ============================================================================
// UnavailableTokenRepo
// ============================================================================

/// Every call fails as if the database were unreachable.
#[derive(Default)]
pub struct UnavailableTokenRepo;

fn unavailable() -> AppError {
    AppError::Database("connection refused".into())
}

#[async_trait]
impl TokenRepoTrait for UnavailableTokenRepo {
    async fn find_by_token(&self, _token: &str) -> AppResult<Option<Token>> {
        Err(unavailable())
    }

    async fn insert(&self, _token: &Token) -> AppResult<()> {
        Err(unavailable())
    }

    async fn list_all(&self) -> AppResult<Vec<Token>> {
        Err(unavailable())
    }

    async fn delete_by_token(&self, _token: &str) -> AppResult<bool> {
        Err(unavailable())
    }
}
