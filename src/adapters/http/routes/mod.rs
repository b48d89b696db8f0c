pub mod moderate;
pub mod tokens;

use axum::Router;

use crate::adapters::http::app_state::AppState;

/// Auth middleware is attached per router, so the state is needed up front.
pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(tokens::router(app_state))
        .merge(moderate::router(app_state))
}
