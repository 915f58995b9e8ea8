use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

pub mod handlers;

/// Build the content router.
/// All routes are relative — the caller mounts this under `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chapters", get(handlers::get_chapters))
        .route("/chapters/:chapter_id/verses", get(handlers::get_verses))
}
