//! Generated items

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DataUrl;

/// Item data as returned by the text model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItem {
    pub name: String,
    pub description: String,
    /// Mechanical effect in a TTRPG context
    pub effect: String,
    /// Estimated value, e.g. "50 gp"
    pub value: String,
    pub rarity: String,
    pub is_magical: bool,
    pub attunement: bool,
}

/// A finished item generation: data plus its illustration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPackage {
    pub item: GeneratedItem,
    pub image: DataUrl,
}
