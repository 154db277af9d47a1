//! Generation API routes
//!
//! Each route submits the matching generator view and answers with the
//! finished asset, or `{ "error": "..." }` carrying the localized message.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::dto::{
    ErrorResponse, ItemGenerationRequest, MiniatureGenerationRequest, NpcGenerationRequest,
    ScenarioGenerationRequest,
};
use crate::application::services::GenerationError;
use crate::domain::entities::{ItemPackage, MiniatureSet, NpcPackage, ScenarioPackage};
use crate::infrastructure::state::AppState;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn generation_error(error: GenerationError) -> ApiError {
    let status = match &error {
        GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
        GenerationError::Busy(_) => StatusCode::CONFLICT,
        GenerationError::MissingImage { .. } => StatusCode::BAD_GATEWAY,
        GenerationError::Remote(_) | GenerationError::Parse(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(error.to_string())))
}

/// Generate a miniature and token from an uploaded creature image
pub async fn generate_miniature(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MiniatureGenerationRequest>,
) -> Result<Json<MiniatureSet>, ApiError> {
    let set = state
        .views
        .submit_miniature(req)
        .await
        .map_err(generation_error)?;
    Ok(Json(set))
}

/// Generate an item, specific or random, with its illustration
pub async fn generate_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ItemGenerationRequest>,
) -> Result<Json<ItemPackage>, ApiError> {
    let package = state.views.submit_item(req).await.map_err(generation_error)?;
    Ok(Json(package))
}

/// Generate a scenario, specific or random, with its illustration
pub async fn generate_scenario(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScenarioGenerationRequest>,
) -> Result<Json<ScenarioPackage>, ApiError> {
    let package = state
        .views
        .submit_scenario(req)
        .await
        .map_err(generation_error)?;
    Ok(Json(package))
}

/// Generate an NPC with stat block, portrait, miniature and token
pub async fn generate_npc(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NpcGenerationRequest>,
) -> Result<Json<NpcPackage>, ApiError> {
    let package = state.views.submit_npc(req).await.map_err(generation_error)?;
    Ok(Json(package))
}
