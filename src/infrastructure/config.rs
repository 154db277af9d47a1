//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `rpg-toolbox.toml` next to the binary, then environment variables
//! (`API_KEY`, `TEXT_MODEL`, `SERVER_PORT`...).

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::application::services::generation_service::{
    DEFAULT_IMAGE_EDIT_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL,
};
use crate::application::services::GenerationModels;
use crate::domain::value_objects::Language;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from defaults, file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Gemini API key; generation calls fail upstream without it
    #[serde(default)]
    pub api_key: Option<String>,
    /// Accepted as an alias of `api_key`
    #[serde(default)]
    gemini_api_key: Option<String>,

    /// Gemini REST API base URL
    pub gemini_base_url: String,

    pub text_model: String,
    pub image_model: String,
    pub image_edit_model: String,

    /// Language used when a request does not name one
    pub default_language: Language,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from `rpg-toolbox.toml` and environment variables
    pub fn from_env() -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::with_name("rpg-toolbox").required(false))
            .add_source(Environment::default())
            .build()
            .context("Failed to read configuration")?;
        Self::from_settings(settings)
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("gemini_base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("text_model", DEFAULT_TEXT_MODEL)?
            .set_default("image_model", DEFAULT_IMAGE_MODEL)?
            .set_default("image_edit_model", DEFAULT_IMAGE_EDIT_MODEL)?
            .set_default("default_language", Language::default().code())?
            .set_default("server_port", 3000)?)
    }

    fn from_settings(settings: Config) -> Result<Self> {
        let mut config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration value")?;

        config.api_key = config
            .api_key
            .take()
            .or(config.gemini_api_key.take())
            .filter(|key| !key.trim().is_empty());

        if config.api_key.is_none() {
            tracing::warn!("API_KEY environment variable is not set. Generation requests will fail.");
        }

        Ok(config)
    }

    pub fn models(&self) -> GenerationModels {
        GenerationModels {
            text: self.text_model.clone(),
            image: self.image_model.clone(),
            image_edit: self.image_edit_model.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_edit_model: DEFAULT_IMAGE_EDIT_MODEL.to_string(),
            default_language: Language::default(),
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(overrides: &[(&str, &str)]) -> Result<AppConfig> {
        let mut builder = AppConfig::defaults()?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        AppConfig::from_settings(builder.build()?)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        let fallback = AppConfig::default();
        assert_eq!(config.models(), fallback.models());
        assert_eq!(config.models(), GenerationModels::default());
        assert_eq!(config.default_language, Language::Pt);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_overrides_and_key_alias() {
        let config = load(&[
            ("gemini_api_key", "secret"),
            ("default_language", "en"),
            ("server_port", "8080"),
            ("text_model", "gemini-2.5-flash"),
        ])
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.models().text, "gemini-2.5-flash");
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = load(&[("api_key", "  ")]).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        assert!(load(&[("default_language", "fr")]).is_err());
    }
}
