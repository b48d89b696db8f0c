//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates an `AppState`
//! backed by in-memory repositories, and `test_server` which wraps the full
//! router (CORS and security headers included) in an `axum_test::TestServer`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use secrecy::SecretString;

use crate::{
    adapters::{classifier::SizeHeuristicClassifier, http::app_state::AppState},
    application::{
        ports::classifier::Classifier,
        use_cases::{
            moderation::ModerationUseCases,
            token::{TokenRepoTrait, TokenUseCases},
            usage::{UsageRepoTrait, usage_channel},
        },
    },
    domain::entities::token::Token,
    infra::{app::create_app, config::AppConfig},
    test_utils::{InMemoryTokenRepo, InMemoryUsageRepo, UnavailableTokenRepo, UnavailableUsageRepo},
};

/// Configuration mirroring the defaults, without touching the environment.
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: SecretString::new("postgres://localhost:5432/image_moderation_test".into()),
        db_max_connections: 1,
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origins: vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ],
        max_upload_bytes: 16 * 1024 * 1024,
        usage_queue_capacity: 64,
        bootstrap_admin_token: None,
        classifier_url: None,
        log_file: None,
    }
}

/// Wrap the full application router in a test server.
pub fn test_server(app_state: AppState) -> TestServer {
    TestServer::new(create_app(app_state)).unwrap()
}

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let admin = create_test_token(|t| t.is_admin = true);
/// let usage = Arc::new(InMemoryUsageRepo::new());
///
/// let app_state = TestAppStateBuilder::new()
///     .with_token(admin)
///     .with_usage_repo(usage.clone())
///     .build();
/// ```
///
/// `with_token_repo` replaces the token repository, so call it before
/// `with_token`.
pub struct TestAppStateBuilder {
    token_repo: Arc<InMemoryTokenRepo>,
    usage_repo: Arc<InMemoryUsageRepo>,
    classifier: Arc<dyn Classifier>,
    unavailable_storage: bool,
    config: AppConfig,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            token_repo: Arc::new(InMemoryTokenRepo::new()),
            usage_repo: Arc::new(InMemoryUsageRepo::new()),
            classifier: Arc::new(SizeHeuristicClassifier),
            unavailable_storage: false,
            config: test_config(),
        }
    }

    pub fn with_token(self, token: Token) -> Self {
        self.token_repo.push(token);
        self
    }

    pub fn with_token_repo(mut self, token_repo: Arc<InMemoryTokenRepo>) -> Self {
        self.token_repo = token_repo;
        self
    }

    pub fn with_usage_repo(mut self, usage_repo: Arc<InMemoryUsageRepo>) -> Self {
        self.usage_repo = usage_repo;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Make every persistence call fail as a transport error.
    pub fn with_unavailable_storage(mut self) -> Self {
        self.unavailable_storage = true;
        self
    }

    pub fn with_config(mut self, overrides: impl FnOnce(&mut AppConfig)) -> Self {
        overrides(&mut self.config);
        self
    }

    /// Build the state and spawn its usage writer. Must run inside a Tokio runtime.
    pub fn build(self) -> AppState {
        let (token_repo, usage_repo): (Arc<dyn TokenRepoTrait>, Arc<dyn UsageRepoTrait>) =
            if self.unavailable_storage {
                (
                    Arc::new(UnavailableTokenRepo) as Arc<dyn TokenRepoTrait>,
                    Arc::new(UnavailableUsageRepo) as Arc<dyn UsageRepoTrait>,
                )
            } else {
                (
                    self.token_repo as Arc<dyn TokenRepoTrait>,
                    self.usage_repo as Arc<dyn UsageRepoTrait>,
                )
            };

        let (usage_logger, usage_writer) =
            usage_channel(usage_repo, self.config.usage_queue_capacity);
        tokio::spawn(usage_writer.run());

        AppState {
            config: Arc::new(self.config),
            token_use_cases: Arc::new(TokenUseCases::new(token_repo)),
            moderation_use_cases: Arc::new(ModerationUseCases::new(
                self.classifier,
                usage_logger,
            )),
        }
    }
}
