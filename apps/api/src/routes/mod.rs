pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::frontend;
use crate::remix::handlers;
use crate::state::AppState;

/// Upper bound on API request bodies. Comfortably above 10,000 escaped CJK chars.
const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/generate", post(handlers::handle_generate))
        .route("/api/platforms", get(handlers::handle_platforms))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        .route("/", get(frontend::serve_root))
        .fallback(frontend::serve_asset)
        .with_state(state)
}
