use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::VersesResponse;
use crate::proxy::clean;
use crate::AppState;

#[derive(Deserialize)]
pub struct VersesParams {
    pub page: Option<u32>,
}

/// `GET /api/chapters` — upstream chapter list, passed through unmodified.
pub async fn get_chapters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let body = state.upstream.forward(&state.tokens, "/chapters", &[]).await?;
    Ok(Json(body))
}

/// `GET /api/chapters/:chapter_id/verses?page=N` — one page of verses with
/// Uthmani script and an English translation, footnote markers stripped.
pub async fn get_verses(
    State(state): State<Arc<AppState>>,
    Path(chapter_id): Path<u32>,
    Query(params): Query<VersesParams>,
) -> Result<Json<VersesResponse>, AppError> {
    let page = params.page.unwrap_or(1);

    let query = [
        ("language", "en".to_string()),
        ("words", "false".to_string()),
        ("translations", state.config.translation_id.to_string()),
        ("fields", "text_uthmani".to_string()),
        ("page", page.to_string()),
        ("per_page", state.config.verses_per_page.to_string()),
    ];

    let body = state
        .upstream
        .forward(
            &state.tokens,
            &format!("/verses/by_chapter/{}", chapter_id),
            &query,
        )
        .await?;

    let mut verses: VersesResponse = serde_json::from_value(body).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("unexpected verse payload shape: {}", e))
    })?;
    clean::clean_verses(&mut verses);

    Ok(Json(verses))
}
