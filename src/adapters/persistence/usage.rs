use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::usage::UsageRepoTrait,
    domain::entities::usage_record::UsageRecord,
};

#[async_trait]
impl UsageRepoTrait for PostgresPersistence {
    async fn insert(&self, record: &UsageRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO usages (token, endpoint, "timestamp")
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.token)
        .bind(&record.endpoint)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }
}
