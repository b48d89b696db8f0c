use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{delete, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{AuthenticatedToken, bearer_auth, require_admin},
    },
    app_error::AppResult,
    application::use_cases::token::fingerprint,
    domain::entities::token::Token,
};

/// Token management. Every route requires an admin token.
pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/tokens", post(create_token).get(list_tokens))
        .route("/auth/tokens/{token}", delete(delete_token))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            bearer_auth,
        ))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTokenPayload {
    #[serde(default)]
    is_admin: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    token: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl From<Token> for TokenResponse {
    fn from(token: Token) -> Self {
        Self {
            token: token.token,
            is_admin: token.is_admin,
            created_at: token.created_at,
        }
    }
}

#[derive(Serialize)]
struct DetailResponse {
    detail: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/tokens
async fn create_token(
    State(app_state): State<AppState>,
    Extension(caller): Extension<AuthenticatedToken>,
    payload: Result<Json<CreateTokenPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;

    tracing::debug!(
        created_by = %fingerprint(&caller.0.token),
        is_admin = payload.is_admin,
        "Creating token"
    );

    let token = app_state
        .token_use_cases
        .create_token(payload.is_admin)
        .await?;

    Ok(Json(TokenResponse::from(token)))
}

/// GET /auth/tokens
async fn list_tokens(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tokens = app_state.token_use_cases.list_tokens().await?;

    Ok(Json(
        tokens
            .into_iter()
            .map(TokenResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// DELETE /auth/tokens/{token}
async fn delete_token(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<impl IntoResponse> {
    app_state.token_use_cases.delete_token(&token).await?;

    Ok(Json(DetailResponse {
        detail: "Token deleted",
    }))
}
