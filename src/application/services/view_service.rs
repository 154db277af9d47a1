//! Generator views - Per-form submission state and downloads
//!
//! Each asset kind has one view that moves through
//! `Idle -> Validating -> InFlight -> Succeeded | Failed`. A new submission
//! discards the previous outcome; a submission while another is validating or
//! in flight is refused.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use super::{AssetGenerationService, GenerationError, Translator};
use crate::application::dto::{
    ItemGenerationRequest, MiniatureGenerationRequest, NpcGenerationRequest,
    ScenarioGenerationRequest,
};
use crate::domain::entities::{ItemPackage, MiniatureSet, NpcPackage, ScenarioPackage};
use crate::domain::value_objects::{
    AssetKind, DataUrl, DataUrlError, GenerationId, ImageSlot, Language,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPhase {
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed,
}

impl ViewPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::InFlight)
    }
}

/// A finished generation held by its view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratedAsset {
    Miniature {
        creature_name: String,
        #[serde(flatten)]
        set: MiniatureSet,
    },
    Item(ItemPackage),
    Scenario(ScenarioPackage),
    Npc(NpcPackage),
}

impl GeneratedAsset {
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Miniature { .. } => AssetKind::Miniature,
            Self::Item(_) => AssetKind::Item,
            Self::Scenario(_) => AssetKind::Scenario,
            Self::Npc(_) => AssetKind::Npc,
        }
    }

    /// Name the download file is derived from
    pub fn display_name(&self) -> &str {
        match self {
            Self::Miniature { creature_name, .. } => creature_name,
            Self::Item(package) => &package.item.name,
            Self::Scenario(package) => &package.scenario.name,
            Self::Npc(package) => &package.npc.name,
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&DataUrl> {
        match (self, slot) {
            (Self::Miniature { set, .. }, ImageSlot::Miniature) => Some(&set.miniature),
            (Self::Miniature { set, .. }, ImageSlot::Token) => Some(&set.token),
            (Self::Item(package), ImageSlot::Image) => Some(&package.image),
            (Self::Scenario(package), ImageSlot::Image) => Some(&package.image),
            (Self::Npc(package), ImageSlot::Portrait) => Some(&package.portrait),
            (Self::Npc(package), ImageSlot::Miniature) => Some(&package.miniature),
            (Self::Npc(package), ImageSlot::Token) => Some(&package.token),
            _ => None,
        }
    }
}

/// State of one generator form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorView {
    pub kind: AssetKind,
    pub phase: ViewPhase,
    pub generation_id: Option<GenerationId>,
    pub language: Option<Language>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub result: Option<GeneratedAsset>,
    pub error: Option<String>,
}

impl GeneratorView {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            phase: ViewPhase::Idle,
            generation_id: None,
            language: None,
            started_at: None,
            finished_at: None,
            result: None,
            error: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("No generated result to download")]
    NoResult,
    #[error("The result has no {0} image")]
    NoImage(&'static str),
    #[error("Stored image could not be decoded: {0}")]
    Decode(#[from] DataUrlError),
}

impl ViewError {
    /// Translation key of the user-facing message
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::NoResult => "errorNoResult",
            Self::NoImage(_) | Self::Decode(_) => "errorNoImage",
        }
    }
}

/// A decoded image ready to be served as an attachment
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDownload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Replace every character outside `[a-z0-9]` with `_` and lowercase
pub fn safe_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// `<name>.png` for single-image kinds, `<name>_<slot>.png` otherwise
pub fn download_file_name(kind: AssetKind, name: &str, slot: ImageSlot) -> String {
    let stem = match safe_file_stem(name) {
        stem if stem.is_empty() => kind.fallback_file_stem().to_string(),
        stem => stem,
    };
    match kind {
        AssetKind::Item | AssetKind::Scenario => format!("{}.png", stem),
        AssetKind::Miniature | AssetKind::Npc => format!("{}_{}.png", stem, slot.as_str()),
    }
}

/// All generator views plus the submission flow that drives them
pub struct GeneratorViews {
    views: HashMap<AssetKind, RwLock<GeneratorView>>,
    generation: Arc<dyn AssetGenerationService>,
    translator: Arc<Translator>,
    default_language: Language,
}

impl GeneratorViews {
    pub fn new(
        generation: Arc<dyn AssetGenerationService>,
        translator: Arc<Translator>,
        default_language: Language,
    ) -> Self {
        let views = AssetKind::ALL
            .into_iter()
            .map(|kind| (kind, RwLock::new(GeneratorView::new(kind))))
            .collect();
        Self {
            views,
            generation,
            translator,
            default_language,
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    fn view(&self, kind: AssetKind) -> &RwLock<GeneratorView> {
        // Every kind is inserted at construction
        &self.views[&kind]
    }

    pub async fn snapshot(&self, kind: AssetKind) -> GeneratorView {
        self.view(kind).read().await.clone()
    }

    /// Move a view into `Validating`, refusing if it is already busy
    async fn begin(
        &self,
        kind: AssetKind,
        language: Language,
    ) -> Result<GenerationId, GenerationError> {
        let mut view = self.view(kind).write().await;
        if view.phase.is_busy() {
            debug!(kind = kind.as_str(), "Submission refused, view busy");
            return Err(GenerationError::Busy(
                self.translator.text(language, "errorGenerationInProgress"),
            ));
        }

        let id = GenerationId::new();
        *view = GeneratorView {
            phase: ViewPhase::Validating,
            generation_id: Some(id),
            language: Some(language),
            started_at: Some(Utc::now()),
            ..GeneratorView::new(kind)
        };
        Ok(id)
    }

    async fn advance(
        &self,
        kind: AssetKind,
        id: GenerationId,
        update: impl FnOnce(&mut GeneratorView),
    ) {
        let mut view = self.view(kind).write().await;
        if view.generation_id == Some(id) {
            update(&mut *view);
        }
    }

    async fn finish(
        &self,
        kind: AssetKind,
        id: GenerationId,
        outcome: Result<GeneratedAsset, &GenerationError>,
    ) {
        self.advance(kind, id, |view| {
            view.finished_at = Some(Utc::now());
            match outcome {
                Ok(asset) => {
                    view.phase = ViewPhase::Succeeded;
                    view.result = Some(asset);
                }
                Err(e) => {
                    view.phase = ViewPhase::Failed;
                    view.error = Some(e.to_string());
                }
            }
        })
        .await;
    }

    /// Validate, call the provider and record the outcome on the view
    async fn submit<S, T, Fut>(
        &self,
        kind: AssetKind,
        language: Language,
        validated: Result<S, &'static str>,
        generate: impl FnOnce(S) -> Fut,
        wrap: impl FnOnce(&T) -> GeneratedAsset,
    ) -> Result<T, GenerationError>
    where
        Fut: Future<Output = Result<T, GenerationError>>,
    {
        let id = self.begin(kind, language).await?;

        let spec = match validated {
            Ok(spec) => spec,
            Err(key) => {
                let e = GenerationError::Validation(self.translator.text(language, key));
                self.finish(kind, id, Err(&e)).await;
                return Err(e);
            }
        };

        self.advance(kind, id, |view| view.phase = ViewPhase::InFlight).await;
        info!(kind = kind.as_str(), generation_id = %id, "Generation started");

        match generate(spec).await {
            Ok(result) => {
                self.finish(kind, id, Ok(wrap(&result))).await;
                Ok(result)
            }
            Err(e) => {
                error!(kind = kind.as_str(), generation_id = %id, "Generation failed: {}", e);
                self.finish(kind, id, Err(&e)).await;
                Err(e)
            }
        }
    }

    fn language(&self, requested: Option<Language>) -> Language {
        requested.unwrap_or(self.default_language)
    }

    pub async fn submit_item(
        &self,
        request: ItemGenerationRequest,
    ) -> Result<ItemPackage, GenerationError> {
        let language = self.language(request.language);
        self.submit(
            AssetKind::Item,
            language,
            request.validate(),
            |spec| self.generation.generate_item(language, spec),
            |package| GeneratedAsset::Item(package.clone()),
        )
        .await
    }

    pub async fn submit_scenario(
        &self,
        request: ScenarioGenerationRequest,
    ) -> Result<ScenarioPackage, GenerationError> {
        let language = self.language(request.language);
        self.submit(
            AssetKind::Scenario,
            language,
            request.validate(),
            |spec| self.generation.generate_scenario(language, spec),
            |package| GeneratedAsset::Scenario(package.clone()),
        )
        .await
    }

    pub async fn submit_miniature(
        &self,
        request: MiniatureGenerationRequest,
    ) -> Result<MiniatureSet, GenerationError> {
        let language = self.language(request.language);
        let validated = request.validate();
        let creature_name = validated
            .as_ref()
            .map(|spec| spec.creature_name.clone())
            .unwrap_or_default();
        self.submit(
            AssetKind::Miniature,
            language,
            validated,
            |spec| self.generation.generate_miniature_set(language, spec),
            |set| GeneratedAsset::Miniature {
                creature_name,
                set: set.clone(),
            },
        )
        .await
    }

    pub async fn submit_npc(
        &self,
        request: NpcGenerationRequest,
    ) -> Result<NpcPackage, GenerationError> {
        let language = self.language(request.language);
        self.submit(
            AssetKind::Npc,
            language,
            request.validate(),
            |spec| self.generation.generate_npc(language, spec),
            |package| GeneratedAsset::Npc(package.clone()),
        )
        .await
    }

    /// Decode one image of the held result for download
    pub async fn download(
        &self,
        kind: AssetKind,
        slot: ImageSlot,
    ) -> Result<ImageDownload, ViewError> {
        let view = self.view(kind).read().await;
        let asset = view.result.as_ref().ok_or(ViewError::NoResult)?;
        let image = asset.image(slot).ok_or(ViewError::NoImage(slot.as_str()))?;

        Ok(ImageDownload {
            file_name: download_file_name(kind, asset.display_name(), slot),
            mime_type: image.mime_type().to_string(),
            bytes: image.decode()?,
        })
    }
}
