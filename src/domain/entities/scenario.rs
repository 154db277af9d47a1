//! Generated scenarios

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DataUrl;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScenario {
    pub name: String,
    /// Sensory details, plot hooks and notable features
    pub detailed_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPackage {
    pub scenario: GeneratedScenario,
    pub image: DataUrl,
}
