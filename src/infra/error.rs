use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// Display messages never include the connection string; the `#[source]`
/// chain may, so log these with `%e`, not `?e`.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Database connection failed. Check DATABASE_URL and ensure the database is running.")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("Database migration failed")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("Classifier client could not be built")]
    ClassifierClient(#[source] reqwest::Error),
}
