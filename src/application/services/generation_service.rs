//! Asset Generation Service - Orchestrates the remote text and image calls
//!
//! Items, scenarios and NPCs share one two-step flow: a schema-constrained
//! text call whose JSON drives an image prompt. `GenerationRecipe` captures
//! what differs between them. Miniatures and tokens are two image edits of
//! the same source issued concurrently; NPCs chain into that flow with their
//! portrait as the source.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::{prompt_builder, schemas, Translator};
use crate::application::dto::{ItemSpec, MiniatureSpec, NpcSpec, ScenarioSpec};
use crate::application::ports::outbound::{
    GenerativeAiPort, ImageEditRequest, ImageGenerationRequest, SourceImage,
    TextGenerationRequest,
};
use crate::domain::entities::{
    GeneratedItem, GeneratedNpc, GeneratedScenario, ItemPackage, MiniatureSet, NpcPackage,
    ScenarioPackage,
};
use crate::domain::value_objects::{
    AspectRatio, CreatureType, DataUrl, ImageSlot, Language, PNG_MIME,
};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_IMAGE_EDIT_MODEL: &str = "gemini-2.5-flash-image";

/// Failure of a generation, carrying the message shown to the user
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Required caller input missing or unusable; nothing was sent
    #[error("{0}")]
    Validation(String),
    /// Another submission of the same view has not finished
    #[error("{0}")]
    Busy(String),
    /// The provider answered without image bytes
    #[error("{message}")]
    MissingImage { slot: ImageSlot, message: String },
    #[error("{0}")]
    Remote(String),
    /// The text model output did not match the expected shape
    #[error("{0}")]
    Parse(String),
}

/// Model identifiers used for each call type
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationModels {
    pub text: String,
    pub image: String,
    pub image_edit: String,
}

impl Default for GenerationModels {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_MODEL.to_string(),
            image: DEFAULT_IMAGE_MODEL.to_string(),
            image_edit: DEFAULT_IMAGE_EDIT_MODEL.to_string(),
        }
    }
}

/// The parts of a text-then-image generation that vary per asset kind
pub trait GenerationRecipe: Send + Sync {
    type Data: DeserializeOwned + Send;

    /// Image slot and translation key reported when the image is missing
    const IMAGE_SLOT: ImageSlot;
    const IMAGE_ERROR_KEY: &'static str;

    fn text_prompt(&self, translator: &Translator, language: Language) -> String;

    fn schema(&self) -> Value;

    fn image_prompt(data: &Self::Data, translator: &Translator, language: Language) -> String;

    fn aspect_ratio(&self) -> AspectRatio;
}

impl GenerationRecipe for ItemSpec {
    type Data = GeneratedItem;

    const IMAGE_SLOT: ImageSlot = ImageSlot::Image;
    const IMAGE_ERROR_KEY: &'static str = "errorItemImageGeneration";

    fn text_prompt(&self, translator: &Translator, language: Language) -> String {
        prompt_builder::item_prompt(translator, language, &self.prompt)
    }

    fn schema(&self) -> Value {
        schemas::item_schema()
    }

    fn image_prompt(data: &GeneratedItem, translator: &Translator, language: Language) -> String {
        prompt_builder::item_image_prompt(translator, language, data)
    }

    fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }
}

impl GenerationRecipe for ScenarioSpec {
    type Data = GeneratedScenario;

    const IMAGE_SLOT: ImageSlot = ImageSlot::Image;
    const IMAGE_ERROR_KEY: &'static str = "errorScenarioImageGeneration";

    fn text_prompt(&self, translator: &Translator, language: Language) -> String {
        prompt_builder::scenario_prompt(translator, language, &self.prompt)
    }

    fn schema(&self) -> Value {
        schemas::scenario_schema()
    }

    fn image_prompt(
        data: &GeneratedScenario,
        translator: &Translator,
        language: Language,
    ) -> String {
        prompt_builder::scenario_image_prompt(translator, language, data)
    }

    fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }
}

impl GenerationRecipe for NpcSpec {
    type Data = GeneratedNpc;

    const IMAGE_SLOT: ImageSlot = ImageSlot::Portrait;
    const IMAGE_ERROR_KEY: &'static str = "errorNpcImageGeneration";

    fn text_prompt(&self, translator: &Translator, language: Language) -> String {
        prompt_builder::npc_prompt(translator, language, self.npc_type, self.gender)
    }

    fn schema(&self) -> Value {
        schemas::npc_schema()
    }

    fn image_prompt(data: &GeneratedNpc, translator: &Translator, language: Language) -> String {
        prompt_builder::npc_portrait_prompt(translator, language, data)
    }

    /// Portraits are always upright
    fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::Portrait
    }
}

/// Asset generation use cases, one per asset kind
#[async_trait]
pub trait AssetGenerationService: Send + Sync {
    async fn generate_item(
        &self,
        language: Language,
        spec: ItemSpec,
    ) -> Result<ItemPackage, GenerationError>;

    async fn generate_scenario(
        &self,
        language: Language,
        spec: ScenarioSpec,
    ) -> Result<ScenarioPackage, GenerationError>;

    async fn generate_miniature_set(
        &self,
        language: Language,
        spec: MiniatureSpec,
    ) -> Result<MiniatureSet, GenerationError>;

    async fn generate_npc(
        &self,
        language: Language,
        spec: NpcSpec,
    ) -> Result<NpcPackage, GenerationError>;
}

/// Default implementation backed by a `GenerativeAiPort`
pub struct AssetGenerationServiceImpl {
    ai: Arc<dyn GenerativeAiPort>,
    translator: Arc<Translator>,
    models: GenerationModels,
}

impl AssetGenerationServiceImpl {
    pub fn new(
        ai: Arc<dyn GenerativeAiPort>,
        translator: Arc<Translator>,
        models: GenerationModels,
    ) -> Self {
        Self {
            ai,
            translator,
            models,
        }
    }

    fn remote(error: anyhow::Error) -> GenerationError {
        error!("Generation request failed: {:#}", error);
        GenerationError::Remote(format!("{:#}", error))
    }

    fn missing_image(&self, language: Language, slot: ImageSlot, key: &str) -> GenerationError {
        let message = self.translator.text(language, key);
        error!(slot = slot.as_str(), "Provider returned no image: {}", message);
        GenerationError::MissingImage { slot, message }
    }

    /// Run the text call and parse its JSON output
    async fn generate_data<R: GenerationRecipe>(
        &self,
        recipe: &R,
        language: Language,
    ) -> Result<R::Data, GenerationError> {
        let request = TextGenerationRequest {
            model: self.models.text.clone(),
            prompt: recipe.text_prompt(&self.translator, language),
            schema: recipe.schema(),
        };

        let raw = self.ai.generate_json(request).await.map_err(Self::remote)?;

        serde_json::from_str(raw.trim()).map_err(|e| {
            error!("Failed to parse generated JSON: {}", e);
            debug!("Unparseable model output: {}", raw);
            GenerationError::Parse(self.translator.text(language, "errorUnknown"))
        })
    }

    /// Run a complete text-then-image recipe
    async fn run_recipe<R: GenerationRecipe>(
        &self,
        recipe: &R,
        language: Language,
    ) -> Result<(R::Data, DataUrl), GenerationError> {
        let data = self.generate_data(recipe, language).await?;

        let request = ImageGenerationRequest {
            model: self.models.image.clone(),
            prompt: R::image_prompt(&data, &self.translator, language),
            count: 1,
            aspect_ratio: recipe.aspect_ratio(),
            output_mime_type: PNG_MIME.to_string(),
        };

        let image = self
            .ai
            .generate_image(request)
            .await
            .map_err(Self::remote)?
            .filter(|bytes| !bytes.is_empty())
            .ok_or_else(|| self.missing_image(language, R::IMAGE_SLOT, R::IMAGE_ERROR_KEY))?;

        Ok((data, DataUrl::png(image)))
    }

    /// Render the miniature and token concurrently from one source image
    async fn render_miniature_set(
        &self,
        language: Language,
        creature_name: &str,
        creature_type: CreatureType,
        scenery: &str,
        source: SourceImage,
    ) -> Result<MiniatureSet, GenerationError> {
        let miniature = ImageEditRequest {
            model: self.models.image_edit.clone(),
            source: source.clone(),
            instruction: prompt_builder::miniature_prompt(
                &self.translator,
                language,
                creature_name,
                creature_type,
                scenery,
            ),
        };
        let token = ImageEditRequest {
            model: self.models.image_edit.clone(),
            source,
            instruction: prompt_builder::token_prompt(
                &self.translator,
                language,
                creature_name,
                creature_type,
            ),
        };

        let (miniature, token) = try_join(self.ai.edit_image(miniature), self.ai.edit_image(token))
            .await
            .map_err(Self::remote)?;

        let miniature = miniature.filter(|b| !b.is_empty()).ok_or_else(|| {
            self.missing_image(language, ImageSlot::Miniature, "errorMiniatureGeneration")
        })?;
        let token = token
            .filter(|b| !b.is_empty())
            .ok_or_else(|| self.missing_image(language, ImageSlot::Token, "errorTokenGeneration"))?;

        Ok(MiniatureSet {
            miniature: DataUrl::png(miniature),
            token: DataUrl::png(token),
        })
    }
}

#[async_trait]
impl AssetGenerationService for AssetGenerationServiceImpl {
    #[instrument(skip(self, spec))]
    async fn generate_item(
        &self,
        language: Language,
        spec: ItemSpec,
    ) -> Result<ItemPackage, GenerationError> {
        let (item, image) = self.run_recipe(&spec, language).await?;
        info!("Generated item: {}", item.name);
        Ok(ItemPackage { item, image })
    }

    #[instrument(skip(self, spec))]
    async fn generate_scenario(
        &self,
        language: Language,
        spec: ScenarioSpec,
    ) -> Result<ScenarioPackage, GenerationError> {
        let (scenario, image) = self.run_recipe(&spec, language).await?;
        info!("Generated scenario: {}", scenario.name);
        Ok(ScenarioPackage { scenario, image })
    }

    #[instrument(skip(self, spec), fields(creature = %spec.creature_name))]
    async fn generate_miniature_set(
        &self,
        language: Language,
        spec: MiniatureSpec,
    ) -> Result<MiniatureSet, GenerationError> {
        let source = SourceImage {
            mime_type: spec.source.mime_type().to_string(),
            data: spec.source.data().to_string(),
        };
        let set = self
            .render_miniature_set(
                language,
                &spec.creature_name,
                spec.creature_type,
                &spec.scenery,
                source,
            )
            .await?;
        info!("Generated miniature and token for {}", spec.creature_name);
        Ok(set)
    }

    #[instrument(skip(self, spec), fields(npc_type = spec.npc_type.as_str()))]
    async fn generate_npc(
        &self,
        language: Language,
        spec: NpcSpec,
    ) -> Result<NpcPackage, GenerationError> {
        let (npc, portrait) = self.run_recipe(&spec, language).await?;
        debug!("Generated NPC portrait for {}", npc.name);

        let source = SourceImage {
            mime_type: PNG_MIME.to_string(),
            data: portrait.data().to_string(),
        };
        let set = self
            .render_miniature_set(
                language,
                &npc.name,
                spec.npc_type.creature_type(),
                &npc.scenery,
                source,
            )
            .await?;

        info!("Generated NPC package: {}", npc.name);
        Ok(NpcPackage {
            npc,
            portrait,
            miniature: set.miniature,
            token: set.token,
        })
    }
}
