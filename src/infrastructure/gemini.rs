//! Gemini client for text, image and image-edit generation

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::outbound::{
    GenerativeAiPort, ImageEditRequest, ImageGenerationRequest, TextGenerationRequest,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini / Imagen REST API
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: String,
        body: &B,
    ) -> Result<R, GeminiError> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(GeminiError::ApiError(error_text));
        }

        Ok(response.json().await?)
    }

    /// Generate content constrained to a JSON schema and return its text
    pub async fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                response_modalities: None,
            },
        };

        let response: GenerateContentResponse = self
            .post(self.model_url(model, "generateContent"), &request)
            .await?;

        response.text().ok_or(GeminiError::EmptyResponse)
    }

    /// Generate an image from a prompt with Imagen
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        parameters: PredictParameters,
    ) -> Result<Option<String>, GeminiError> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters,
        };

        let response: PredictResponse = self.post(self.model_url(model, "predict"), &request).await?;

        Ok(response
            .predictions
            .into_iter()
            .next()
            .and_then(|p| p.bytes_base64_encoded))
    }

    /// Send an image plus an instruction and return the first image part
    pub async fn edit_image(
        &self,
        model: &str,
        mime_type: &str,
        data: &str,
        instruction: &str,
    ) -> Result<Option<String>, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::inline_data(mime_type, data), Part::text(instruction)],
            }],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            },
        };

        let response: GenerateContentResponse = self
            .post(self.model_url(model, "generateContent"), &request)
            .await?;

        Ok(response.first_image())
    }

    /// Check if the API is reachable with the configured key
    pub async fn health_check(&self) -> Result<bool, GeminiError> {
        let mut request = self.client.get(format!("{}/models", self.base_url));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?;

        Ok(response.status().is_success())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Response contained no text")]
    EmptyResponse,
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter())
            .into_iter()
            .flatten()
    }

    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn first_image(&self) -> Option<String> {
        self.parts()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.clone())
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: OutputOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

// =============================================================================
// GenerativeAiPort Implementation
// =============================================================================

#[async_trait]
impl GenerativeAiPort for GeminiClient {
    async fn generate_json(&self, request: TextGenerationRequest) -> Result<String> {
        let text =
            GeminiClient::generate_json(self, &request.model, &request.prompt, request.schema)
                .await?;
        Ok(text)
    }

    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<Option<String>> {
        let parameters = PredictParameters {
            sample_count: request.count,
            aspect_ratio: request.aspect_ratio.as_str().to_string(),
            output_options: OutputOptions {
                mime_type: request.output_mime_type,
            },
        };
        let image =
            GeminiClient::generate_image(self, &request.model, &request.prompt, parameters).await?;
        Ok(image)
    }

    async fn edit_image(&self, request: ImageEditRequest) -> Result<Option<String>> {
        let image = GeminiClient::edit_image(
            self,
            &request.model,
            &request.source.mime_type,
            &request.source.data,
            &request.instruction,
        )
        .await?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("Invent an item")],
            }],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(json!({"type": "OBJECT"})),
                response_modalities: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{"parts": [{"text": "Invent an item"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn test_edit_request_puts_image_before_instruction() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::inline_data("image/png", "AAAA"), Part::text("Make a token")],
            }],
            generation_config: GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][0],
            json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}})
        );
        assert_eq!(value["contents"][0]["parts"][1]["text"], "Make a token");
        assert_eq!(value["generationConfig"]["responseModalities"], json!(["IMAGE"]));
    }

    #[test]
    fn test_response_text_and_image_extraction() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "{\"name\":"},
                    {"text": "\"Rope\"}"},
                    {"inlineData": {"mimeType": "image/png", "data": "UE5H"}}
                ]}
            }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"name\":\"Rope\"}"));
        assert_eq!(response.first_image().as_deref(), Some("UE5H"));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.text().is_none());
        assert!(empty.first_image().is_none());
    }

    #[test]
    fn test_predict_request_and_response() {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: "A castle".to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "16:9".to_string(),
                output_options: OutputOptions {
                    mime_type: "image/png".to_string(),
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap()["parameters"],
            json!({"sampleCount": 1, "aspectRatio": "16:9", "outputOptions": {"mimeType": "image/png"}})
        );

        let response: PredictResponse = serde_json::from_value(json!({
            "predictions": [{"bytesBase64Encoded": "QUJD", "mimeType": "image/png"}]
        }))
        .unwrap();
        assert_eq!(
            response.predictions[0].bytes_base64_encoded.as_deref(),
            Some("QUJD")
        );

        let filtered: PredictResponse = serde_json::from_value(json!({})).unwrap();
        assert!(filtered.predictions.is_empty());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = GeminiClient::new("https://example.test/v1beta/", None);
        assert_eq!(
            client.model_url("imagen-4.0-generate-001", "predict"),
            "https://example.test/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }
}
