use axum::{
    Extension,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppError,
    application::use_cases::token::fingerprint,
    domain::entities::token::Token,
};

/// The token that authenticated the current request. Lives only in the
/// request's extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedToken(pub Token);

/// Resolve `Authorization: Bearer <token>` and attach the matching record to
/// the request. Missing or unknown tokens are rejected with 401.
pub async fn bearer_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(raw_token) = bearer_token(request.headers()).map(str::to_owned) else {
        tracing::debug!(uri = %request.uri(), "Missing bearer token");
        return Err(AppError::InvalidCredentials);
    };

    let token = app_state
        .token_use_cases
        .authenticate(&raw_token)
        .await?
        .ok_or_else(|| {
            tracing::debug!(token = %fingerprint(&raw_token), "Unknown bearer token");
            AppError::InvalidCredentials
        })?;

    request.extensions_mut().insert(AuthenticatedToken(token));

    Ok(next.run(request).await)
}

/// Must run after [`bearer_auth`]. Rejects non-admin tokens with 403.
pub async fn require_admin(
    Extension(caller): Extension<AuthenticatedToken>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !caller.0.is_admin {
        tracing::warn!(
            token = %fingerprint(&caller.0.token),
            uri = %request.uri(),
            "Admin route called with non-admin token"
        );
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, credentials) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let credentials = credentials.trim();
    (!credentials.is_empty()).then_some(credentials)
}
