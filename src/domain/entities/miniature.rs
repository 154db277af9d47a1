//! Miniature and token renders derived from a source image

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DataUrl;

/// A painted miniature render and a round VTT token of the same creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniatureSet {
    pub miniature: DataUrl,
    pub token: DataUrl,
}
