use std::{net::SocketAddr, path::PathBuf};

use axum::http::{HeaderValue, header::InvalidHeaderValue};
use env_helpers::get_env_default;
use secrecy::SecretString;
use url::Url;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/image_moderation";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

pub struct AppConfig {
    pub database_url: SecretString,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Browser origins allowed to call the API with credentials.
    pub cors_origins: Vec<HeaderValue>,
    /// Upper bound on a `/moderate` request body.
    pub max_upload_bytes: usize,
    /// Usage records allowed to wait for the writer before new ones are dropped.
    pub usage_queue_capacity: usize,
    /// Admin token seeded at startup when absent, so a fresh database is usable.
    pub bootstrap_admin_token: Option<SecretString>,
    /// External classifier endpoint. The size heuristic is used when unset.
    pub classifier_url: Option<Url>,
    /// Optional JSON log file alongside console output.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = SecretString::new(
            get_env_default("DATABASE_URL", DEFAULT_DATABASE_URL.to_string()).into(),
        );
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 7000)));

        let cors_origins = parse_origins(&get_env_default(
            "CORS_ORIGINS",
            DEFAULT_CORS_ORIGINS.to_string(),
        ))
        .expect("CORS_ORIGINS must be a comma-separated list of valid origins");

        let max_upload_bytes: usize = get_env_default("MAX_UPLOAD_BYTES", 16 * 1024 * 1024);
        let usage_queue_capacity: usize = get_env_default("USAGE_QUEUE_CAPACITY", 1024);

        let bootstrap_admin_token =
            optional_env("BOOTSTRAP_ADMIN_TOKEN").map(|t| SecretString::new(t.into()));

        let classifier_url: Option<Url> = optional_env("CLASSIFIER_URL")
            .map(|raw| raw.parse().expect("CLASSIFIER_URL must be a valid URL"));

        let log_file = optional_env("LOG_FILE").map(PathBuf::from);

        Self {
            database_url,
            db_max_connections,
            bind_addr,
            cors_origins,
            max_upload_bytes,
            usage_queue_capacity,
            bootstrap_admin_token,
            classifier_url,
            log_file,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a comma-separated origin list. Empty entries are skipped.
///
/// A wildcard is refused: credentials are allowed, and browsers reject `*`
/// together with credentials.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .map(HeaderValue::from_str)
        .collect()
}
