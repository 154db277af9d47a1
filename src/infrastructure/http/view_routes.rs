//! Generator view API routes

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::ApiError;
use crate::application::dto::{ErrorResponse, ViewSnapshotDto};
use crate::domain::value_objects::{AssetKind, ImageSlot, Language};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub lang: Option<Language>,
}

fn not_found(message: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(message)))
}

/// Current state of one generator view
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Json<ViewSnapshotDto>, ApiError> {
    let kind: AssetKind = kind.parse().map_err(not_found)?;
    let view = state.views.snapshot(kind).await;

    Ok(Json(ViewSnapshotDto::from_view(
        view,
        &state.translator,
        state.views.default_language(),
    )))
}

/// Download one image of the view's result as a PNG attachment
pub async fn download_image(
    State(state): State<Arc<AppState>>,
    Path((kind, slot)): Path<(String, String)>,
    Query(query): Query<LanguageQuery>,
) -> Result<Response, ApiError> {
    let kind: AssetKind = kind.parse().map_err(not_found)?;
    let slot: ImageSlot = slot.parse().map_err(not_found)?;

    let download = state.views.download(kind, slot).await.map_err(|e| {
        tracing::debug!("Download refused: {}", e);
        let language = query.lang.unwrap_or(state.views.default_language());
        not_found(state.translator.text(language, e.message_key()))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, download.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.file_name),
            ),
        ],
        download.bytes,
    )
        .into_response())
}
