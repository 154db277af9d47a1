//! Generation request DTOs and their validated forms
//!
//! Requests mirror the form fields a front end collects. Every field is
//! optional on the wire so that a missing value turns into the localized
//! validation message instead of a deserialization error.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AspectRatio, CreatureType, DataUrl, Language, NpcGender, NpcType,
};

/// Translation keys of the validation messages
pub const ERROR_ALL_FIELDS: &str = "errorAllFields";
pub const ERROR_ITEM_FIELDS: &str = "errorItemFields";
pub const ERROR_SCENARIO_FIELDS: &str = "errorScenarioFields";
pub const ERROR_NPC_FIELDS: &str = "errorNpcFields";
pub const ERROR_INVALID_IMAGE: &str = "errorInvalidImage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Built from the caller's fields
    #[default]
    Specific,
    /// The model invents everything
    Random,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemGenerationRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub mode: GenerationMode,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_magical: Option<bool>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<AspectRatio>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemPrompt {
    Specific {
        name: String,
        is_magical: bool,
        rarity: String,
    },
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub prompt: ItemPrompt,
    pub aspect_ratio: AspectRatio,
}

impl ItemGenerationRequest {
    /// Returns the translation key of the validation message on failure
    pub fn validate(&self) -> Result<ItemSpec, &'static str> {
        let prompt = match self.mode {
            GenerationMode::Random => ItemPrompt::Random,
            GenerationMode::Specific => {
                match (present(&self.name), self.is_magical, present(&self.rarity)) {
                    (Some(name), Some(is_magical), Some(rarity)) => ItemPrompt::Specific {
                        name,
                        is_magical,
                        rarity,
                    },
                    _ => return Err(ERROR_ITEM_FIELDS),
                }
            }
        };

        Ok(ItemSpec {
            prompt,
            aspect_ratio: self.aspect_ratio.unwrap_or(AspectRatio::Square),
        })
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioGenerationRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub mode: GenerationMode,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<AspectRatio>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioPrompt {
    Specific { name: String, description: String },
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    pub prompt: ScenarioPrompt,
    pub aspect_ratio: AspectRatio,
}

impl ScenarioGenerationRequest {
    pub fn validate(&self) -> Result<ScenarioSpec, &'static str> {
        let prompt = match self.mode {
            GenerationMode::Random => ScenarioPrompt::Random,
            GenerationMode::Specific => {
                match (present(&self.name), present(&self.description)) {
                    (Some(name), Some(description)) => {
                        ScenarioPrompt::Specific { name, description }
                    }
                    _ => return Err(ERROR_SCENARIO_FIELDS),
                }
            }
        };

        Ok(ScenarioSpec {
            prompt,
            aspect_ratio: self.aspect_ratio.unwrap_or(AspectRatio::Landscape),
        })
    }
}

// ============================================================================
// Miniatures
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiniatureGenerationRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub creature_name: Option<String>,
    #[serde(default)]
    pub creature_type: Option<CreatureType>,
    #[serde(default)]
    pub scenery: Option<String>,
    /// The uploaded creature picture as a `data:` URL
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiniatureSpec {
    pub creature_name: String,
    pub creature_type: CreatureType,
    pub scenery: String,
    pub source: DataUrl,
}

impl MiniatureGenerationRequest {
    pub fn validate(&self) -> Result<MiniatureSpec, &'static str> {
        let (Some(creature_name), Some(creature_type), Some(scenery), Some(image)) = (
            present(&self.creature_name),
            self.creature_type,
            present(&self.scenery),
            present(&self.image),
        ) else {
            return Err(ERROR_ALL_FIELDS);
        };

        let source = DataUrl::parse(&image).map_err(|_| ERROR_INVALID_IMAGE)?;
        if !source.is_image() {
            return Err(ERROR_INVALID_IMAGE);
        }

        Ok(MiniatureSpec {
            creature_name,
            creature_type,
            scenery,
            source,
        })
    }
}

// ============================================================================
// NPCs
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpcGenerationRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub npc_type: Option<NpcType>,
    #[serde(default)]
    pub gender: Option<NpcGender>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcSpec {
    pub npc_type: NpcType,
    pub gender: NpcGender,
}

impl NpcGenerationRequest {
    pub fn validate(&self) -> Result<NpcSpec, &'static str> {
        match (self.npc_type, self.gender) {
            (Some(npc_type), Some(gender)) => Ok(NpcSpec { npc_type, gender }),
            _ => Err(ERROR_NPC_FIELDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_item_requires_all_fields() {
        let request = ItemGenerationRequest {
            name: Some("Sun Blade".into()),
            is_magical: Some(true),
            ..Default::default()
        };
        assert_eq!(request.validate(), Err(ERROR_ITEM_FIELDS));

        let request = ItemGenerationRequest {
            rarity: Some("Rare".into()),
            ..request
        };
        let spec = request.validate().unwrap();
        assert_eq!(spec.aspect_ratio, AspectRatio::Square);
        assert!(matches!(spec.prompt, ItemPrompt::Specific { is_magical: true, .. }));
    }

    #[test]
    fn test_not_magical_is_a_valid_answer() {
        let request = ItemGenerationRequest {
            name: Some("Rope".into()),
            is_magical: Some(false),
            rarity: Some("Common".into()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_random_modes_skip_field_checks() {
        let item = ItemGenerationRequest {
            mode: GenerationMode::Random,
            ..Default::default()
        };
        assert_eq!(item.validate().unwrap().prompt, ItemPrompt::Random);

        let scenario = ScenarioGenerationRequest {
            mode: GenerationMode::Random,
            aspect_ratio: Some(AspectRatio::Wide),
            ..Default::default()
        };
        let spec = scenario.validate().unwrap();
        assert_eq!(spec.prompt, ScenarioPrompt::Random);
        assert_eq!(spec.aspect_ratio, AspectRatio::Wide);
    }

    #[test]
    fn test_scenario_blank_description_is_missing() {
        let request = ScenarioGenerationRequest {
            name: Some("The Drowned Keep".into()),
            description: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(request.validate(), Err(ERROR_SCENARIO_FIELDS));
    }

    #[test]
    fn test_miniature_validation() {
        let complete = MiniatureGenerationRequest {
            language: None,
            creature_name: Some("Goblin".into()),
            creature_type: Some(CreatureType::Enemy),
            scenery: Some("mossy stones".into()),
            image: Some("data:image/jpeg;base64,/9j/4AAQ".into()),
        };
        let spec = complete.validate().unwrap();
        assert_eq!(spec.source.mime_type(), "image/jpeg");

        let missing_type = MiniatureGenerationRequest {
            creature_type: None,
            ..complete.clone()
        };
        assert_eq!(missing_type.validate(), Err(ERROR_ALL_FIELDS));

        let not_an_image = MiniatureGenerationRequest {
            image: Some("data:application/pdf;base64,JVBERi0=".into()),
            ..complete.clone()
        };
        assert_eq!(not_an_image.validate(), Err(ERROR_INVALID_IMAGE));

        let garbage = MiniatureGenerationRequest {
            image: Some("hello".into()),
            ..complete
        };
        assert_eq!(garbage.validate(), Err(ERROR_INVALID_IMAGE));
    }

    #[test]
    fn test_npc_requires_type_and_gender() {
        let request = NpcGenerationRequest {
            npc_type: Some(NpcType::Neutral),
            ..Default::default()
        };
        assert_eq!(request.validate(), Err(ERROR_NPC_FIELDS));

        let request: NpcGenerationRequest =
            serde_json::from_str(r#"{"npc_type":"enemy","gender":"any","language":"en"}"#)
                .unwrap();
        assert_eq!(
            request.validate(),
            Ok(NpcSpec {
                npc_type: NpcType::Enemy,
                gender: NpcGender::Any
            })
        );
        assert_eq!(request.language, Some(Language::En));
    }
}
