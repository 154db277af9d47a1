//! Creature and NPC classifications
//!
//! These drive both prompt wording and stat block presentation. Each variant
//! knows the translation key used for its label.

use serde::{Deserialize, Serialize};

/// Role of a creature on the table, used for miniature base and token ring colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Enemy,
    Player,
    Ally,
    Npc,
}

impl CreatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enemy => "enemy",
            Self::Player => "player",
            Self::Ally => "ally",
            Self::Npc => "npc",
        }
    }

    pub fn label_key(&self) -> &'static str {
        self.as_str()
    }
}

/// Disposition of a generated NPC towards the party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcType {
    Ally,
    Neutral,
    Enemy,
}

impl NpcType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ally => "ally",
            Self::Neutral => "neutral",
            Self::Enemy => "enemy",
        }
    }

    /// Key of the descriptive phrase used inside prompts
    pub fn prompt_key(&self) -> String {
        format!("npcType.{}", self.as_str())
    }

    /// Creature type used when rendering this NPC as a miniature and token
    pub fn creature_type(&self) -> CreatureType {
        match self {
            Self::Enemy => CreatureType::Enemy,
            Self::Ally => CreatureType::Ally,
            Self::Neutral => CreatureType::Npc,
        }
    }

    /// Enemies are rated by challenge rating, everyone else by character level
    pub fn uses_challenge_rating(&self) -> bool {
        matches!(self, Self::Enemy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcGender {
    Male,
    Female,
    Any,
}

impl NpcGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Any => "any",
        }
    }

    pub fn label_key(&self) -> String {
        format!("gender.{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npc_type_maps_to_creature_type() {
        assert_eq!(NpcType::Enemy.creature_type(), CreatureType::Enemy);
        assert_eq!(NpcType::Ally.creature_type(), CreatureType::Ally);
        assert_eq!(NpcType::Neutral.creature_type(), CreatureType::Npc);
    }

    #[test]
    fn test_keys() {
        assert_eq!(NpcType::Neutral.prompt_key(), "npcType.neutral");
        assert_eq!(NpcGender::Female.label_key(), "gender.female");
        assert_eq!(CreatureType::Player.label_key(), "player");
    }

    #[test]
    fn test_challenge_rating_only_for_enemies() {
        assert!(NpcType::Enemy.uses_challenge_rating());
        assert!(!NpcType::Ally.uses_challenge_rating());
        assert!(!NpcType::Neutral.uses_challenge_rating());
    }
}
