//! Generative AI port - Interface to the hosted text and image models
//!
//! The application layer only knows about three calls: structured text
//! generation, prompt-to-image generation and image-to-image editing. Images
//! cross this boundary as raw base64 strings; wrapping them as data URLs is
//! the caller's concern.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::value_objects::AspectRatio;

/// A text generation call constrained to a JSON response shape
#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerationRequest {
    pub model: String,
    pub prompt: String,
    /// Response schema the model output must follow
    pub schema: Value,
}

/// A prompt-to-image call
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub count: u32,
    pub aspect_ratio: AspectRatio,
    pub output_mime_type: String,
}

/// Image bytes handed to an edit call
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub mime_type: String,
    /// Base64 encoded bytes
    pub data: String,
}

/// An image-to-image call that returns a new image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEditRequest {
    pub model: String,
    pub source: SourceImage,
    pub instruction: String,
}

#[async_trait]
pub trait GenerativeAiPort: Send + Sync {
    /// Returns the raw JSON text produced by the model
    async fn generate_json(&self, request: TextGenerationRequest) -> Result<String>;

    /// Returns the base64 bytes of the first generated image, if any
    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<Option<String>>;

    /// Returns the base64 bytes of the first image part in the response, if any
    async fn edit_image(&self, request: ImageEditRequest) -> Result<Option<String>>;
}
