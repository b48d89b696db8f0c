use async_trait::async_trait;
use sqlx::Row;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::use_cases::token::TokenRepoTrait,
    domain::entities::token::Token,
};

fn row_to_token(row: sqlx::postgres::PgRow) -> Token {
    Token {
        token: row.get("token"),
        is_admin: row.get("is_admin"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TokenRepoTrait for PostgresPersistence {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Token>> {
        let row = sqlx::query("SELECT token, is_admin, created_at FROM tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(row_to_token))
    }

    async fn insert(&self, token: &Token) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tokens (token, is_admin, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&token.token)
        .bind(token.is_admin)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Token>> {
        let rows = sqlx::query("SELECT token, is_admin, created_at FROM tokens ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(row_to_token).collect())
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
