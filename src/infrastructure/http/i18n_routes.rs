//! String table API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::ApiError;
use crate::application::dto::ErrorResponse;
use crate::domain::value_objects::Language;
use crate::infrastructure::state::AppState;

fn parse_language(lang: &str) -> Result<Language, ApiError> {
    lang.parse()
        .map_err(|e: String| (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e))))
}

/// Full string table for a language
pub async fn get_strings(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let language = parse_language(&lang)?;
    let table = state.translator.table(language).cloned().ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("No strings for {}", language))),
        )
    })?;
    Ok(Json(table))
}

/// Rarity options offered by the item form
pub async fn get_rarities(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let language = parse_language(&lang)?;
    Ok(Json(state.translator.list(language, "rarities")))
}
