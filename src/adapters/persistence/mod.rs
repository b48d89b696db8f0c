use sqlx::PgPool;

use crate::app_error::AppError;

pub mod token;
pub mod usage;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record"),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::InvalidInput("A record with this value already exists".into())
            }
            _ => {
                // Pool timeouts, I/O and TLS failures all land here.
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}
