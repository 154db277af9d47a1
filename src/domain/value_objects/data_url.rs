//! Base64 data URLs carrying generated or uploaded images

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const PNG_MIME: &str = "image/png";

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("Malformed data URL: {0}")]
    Malformed(String),
    #[error("Data URL is not base64 encoded")]
    NotBase64,
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// An inline `data:<mime>;base64,<payload>` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    data: String,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Wrap a base64 PNG payload as returned by the image models
    pub fn png(data: impl Into<String>) -> Self {
        Self::new(PNG_MIME, data)
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn parse(input: &str) -> Result<Self, DataUrlError> {
        let rest = input
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| DataUrlError::Malformed("missing 'data:' scheme".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| DataUrlError::Malformed("missing ',' separator".to_string()))?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(DataUrlError::NotBase64);
        }
        if mime_type.is_empty() {
            return Err(DataUrlError::Malformed("missing MIME type".to_string()));
        }

        Ok(Self::new(mime_type.to_ascii_lowercase(), payload.trim()))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The raw base64 payload
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        Ok(STANDARD.decode(self.data.as_bytes())?)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

impl Serialize for DataUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DataUrl::parse(&raw).map_err(serde::de::Error::custom)
    }
}
