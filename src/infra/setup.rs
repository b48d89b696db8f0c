use crate::{
    adapters::{
        classifier::{RemoteClassifier, SizeHeuristicClassifier},
        http::app_state::AppState,
    },
    application::ports::classifier::Classifier,
    infra::{InfraError, config::AppConfig, postgres_persistence},
    use_cases::{
        moderation::ModerationUseCases,
        token::{TokenRepoTrait, TokenUseCases},
        usage::{UsageRepoTrait, usage_channel},
    },
};
use secrecy::ExposeSecret;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Wire persistence, use cases and the usage writer.
///
/// The returned handle completes once every `AppState` clone is dropped and
/// the usage queue is drained.
pub async fn init_app_state(config: AppConfig) -> anyhow::Result<(AppState, JoinHandle<()>)> {
    let postgres_arc =
        Arc::new(postgres_persistence(&config.database_url, config.db_max_connections).await?);

    let token_repo_arc = postgres_arc.clone() as Arc<dyn TokenRepoTrait>;
    let usage_repo_arc = postgres_arc.clone() as Arc<dyn UsageRepoTrait>;

    let token_use_cases = TokenUseCases::new(token_repo_arc);
    if let Some(bootstrap) = &config.bootstrap_admin_token {
        token_use_cases
            .ensure_admin_token(bootstrap.expose_secret())
            .await?;
    }

    let classifier: Arc<dyn Classifier> = match &config.classifier_url {
        Some(url) => {
            tracing::info!(classifier_url = %url, "Using remote classifier");
            Arc::new(RemoteClassifier::new(url.clone()).map_err(InfraError::ClassifierClient)?)
        }
        None => {
            tracing::info!("Using size heuristic classifier");
            Arc::new(SizeHeuristicClassifier)
        }
    };

    let (usage_logger, usage_writer) = usage_channel(usage_repo_arc, config.usage_queue_capacity);
    let usage_writer_handle = tokio::spawn(usage_writer.run());

    let moderation_use_cases = ModerationUseCases::new(classifier, usage_logger);

    Ok((
        AppState {
            config: Arc::new(config),
            token_use_cases: Arc::new(token_use_cases),
            moderation_use_cases: Arc::new(moderation_use_cases),
        },
        usage_writer_handle,
    ))
}

pub fn init_tracing(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "image_moderation=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), only when asked for
    let json_layer = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(true)
                .with_span_list(true),
        ),
        Err(err) => {
            eprintln!("cannot create log file {}: {err}", path.display());
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
