//! Configuration API routes
//!
//! Read-only view of the generation settings. The API key itself is never
//! exposed, only whether one is configured.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::value_objects::{AspectRatio, Language};
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub text_model: String,
    pub image_model: String,
    pub image_edit_model: String,
    pub default_language: Language,
    pub languages: Vec<Language>,
    pub aspect_ratios: Vec<AspectRatio>,
    pub has_api_key: bool,
}

/// Get current generation configuration
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let config = &state.config;
    Json(ConfigResponse {
        text_model: config.text_model.clone(),
        image_model: config.image_model.clone(),
        image_edit_model: config.image_edit_model.clone(),
        default_language: config.default_language,
        languages: Language::ALL.to_vec(),
        aspect_ratios: AspectRatio::ALL.to_vec(),
        has_api_key: config.has_api_key(),
    })
}
