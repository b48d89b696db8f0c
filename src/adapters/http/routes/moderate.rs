use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, multipart::{Multipart, MultipartError}},
    http::StatusCode,
    middleware,
    routing::post,
};

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{AuthenticatedToken, bearer_auth},
    },
    app_error::{AppError, AppResult},
    domain::entities::safety_report::SafetyReport,
};

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/moderate", post(moderate))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            bearer_auth,
        ))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes))
}

/// POST /moderate
/// Any valid token may call this; admin is not required.
async fn moderate(
    State(app_state): State<AppState>,
    Extension(caller): Extension<AuthenticatedToken>,
    mut multipart: Multipart,
) -> AppResult<Json<SafetyReport>> {
    let content = read_file_field(&mut multipart).await?;

    let report = app_state
        .moderation_use_cases
        .moderate(&caller.0, &content)
        .await?;

    Ok(Json(report))
}

async fn read_file_field(multipart: &mut Multipart) -> AppResult<Bytes> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(FILE_FIELD) {
            return field.bytes().await.map_err(multipart_error);
        }
    }

    Err(AppError::InvalidInput(format!(
        "Missing multipart field `{FILE_FIELD}`"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidInput(err.body_text())
    }
}
