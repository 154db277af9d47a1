//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::GenerativeAiPort;
use crate::application::services::{AssetGenerationServiceImpl, GeneratorViews, Translator};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::gemini::GeminiClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub translator: Arc<Translator>,
    /// Generator views, one per asset kind, driving the generation service
    pub views: GeneratorViews,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize Gemini client
        let gemini = GeminiClient::new(&config.gemini_base_url, config.api_key.clone());

        if config.has_api_key() {
            match gemini.health_check().await {
                Ok(true) => tracing::info!("Gemini API reachable"),
                Ok(false) => tracing::warn!("Gemini API rejected the configured key"),
                Err(e) => tracing::warn!("Gemini API unreachable: {}", e),
            }
        }

        Self::with_port(config, Arc::new(gemini))
    }

    /// Build the state around any generative provider
    pub fn with_port(config: AppConfig, ai: Arc<dyn GenerativeAiPort>) -> Result<Self> {
        let translator = Arc::new(Translator::embedded()?);

        // Initialize application services
        let generation = Arc::new(AssetGenerationServiceImpl::new(
            ai,
            translator.clone(),
            config.models(),
        ));
        let views = GeneratorViews::new(generation, translator.clone(), config.default_language);

        Ok(Self {
            config,
            translator,
            views,
        })
    }
}
