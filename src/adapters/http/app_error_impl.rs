use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        match self {
            AppError::Database(_) => error_resp(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabaseUnavailable,
                "Storage temporarily unavailable".into(),
            ),
            AppError::InvalidCredentials => {
                let mut resp = error_resp(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::InvalidCredentials,
                    "Invalid token".into(),
                );
                resp.headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                resp
            }
            AppError::Forbidden => error_resp(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden,
                "Admin privileges required".into(),
            ),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, msg)
            }
            AppError::PayloadTooLarge => error_resp(
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorCode::PayloadTooLarge,
                "Upload exceeds the size limit".into(),
            ),
            AppError::NotFound(what) => error_resp(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                format!("{what} not found"),
            ),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "Internal error".into(),
            ),
        }
    }
}

/// Malformed, mistyped or missing JSON bodies share the `{code, detail}` shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, detail: String) -> Response {
    let body = serde_json::json!({ "code": code.as_str(), "detail": detail });
    (status, Json(body)).into_response()
}
