//! Response DTOs for generator views and API errors

use serde::Serialize;

use super::StatBlockView;
use crate::application::services::{GeneratedAsset, GeneratorView, Translator};
use crate::domain::value_objects::{ImageSlot, Language};

/// Body of every error response: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A view as shown to a front end: its state plus display helpers
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshotDto {
    #[serde(flatten)]
    pub view: GeneratorView,
    /// Rendered stat block for NPC results, in the submission language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_block: Option<StatBlockView>,
    /// Image slots that can be downloaded from the held result
    pub downloads: Vec<ImageSlot>,
}

impl ViewSnapshotDto {
    pub fn from_view(view: GeneratorView, translator: &Translator, fallback: Language) -> Self {
        let language = view.language.unwrap_or(fallback);
        let stat_block = match &view.result {
            Some(GeneratedAsset::Npc(package)) => Some(StatBlockView::render(
                &package.npc.stat_block,
                package.npc.npc_type,
                translator,
                language,
            )),
            _ => None,
        };
        let downloads = match &view.result {
            Some(asset) => view
                .kind
                .slots()
                .iter()
                .copied()
                .filter(|slot| asset.image(*slot).is_some())
                .collect(),
            None => Vec::new(),
        };

        Self {
            view,
            stat_block,
            downloads,
        }
    }
}
