//! D&D 5e style stat block returned by the text model for NPCs
//!
//! The model is asked for a fixed JSON shape, but numbers frequently come
//! back as floats and pair lists as ragged arrays, so deserialization here is
//! lenient: floats are rounded, missing sections default to empty and the
//! ability array is normalized to exactly six scores.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::value_objects::NpcType;

pub const DEFAULT_ABILITY_SCORE: i32 = 10;

/// The six abilities, in stat block order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Short key, also the last segment of its label translation key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Strength => "str",
            Self::Dexterity => "dex",
            Self::Constitution => "con",
            Self::Intelligence => "int",
            Self::Wisdom => "wis",
            Self::Charisma => "cha",
        }
    }
}

/// Ability modifier: floor((score - 10) / 2)
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Format a bonus with an explicit sign, e.g. `+0`, `+3`, `-1`
pub fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Exactly six ability scores in STR, DEX, CON, INT, WIS, CHA order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityScores([i32; 6]);

impl AbilityScores {
    pub fn new(scores: [i32; 6]) -> Self {
        Self(scores)
    }

    /// Build from any number of scores: extras are dropped, gaps filled with 10
    pub fn from_slice(scores: &[i32]) -> Self {
        let mut normalized = [DEFAULT_ABILITY_SCORE; 6];
        for (slot, score) in normalized.iter_mut().zip(scores) {
            *slot = *score;
        }
        Self(normalized)
    }

    pub fn score(&self, ability: Ability) -> i32 {
        self.0[ability as usize]
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.score(ability))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.iter().map(move |a| (*a, self.score(*a)))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self([DEFAULT_ABILITY_SCORE; 6])
    }
}

impl Serialize for AbilityScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AbilityScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<f64>::deserialize(deserializer)?;
        let scores: Vec<i32> = raw.into_iter().map(|v| v.round() as i32).collect();
        Ok(Self::from_slice(&scores))
    }
}

/// A saving throw or skill bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    pub name: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub value: i32,
}

impl Bonus {
    /// `Stealth +4`
    pub fn display(&self) -> String {
        let mut chars = self.name.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{} {}", name, signed(self.value))
    }
}

/// Join bonuses as `Dex +4, Wis +2`
pub fn format_bonuses(bonuses: &[Bonus]) -> String {
    bonuses
        .iter()
        .map(Bonus::display)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A named trait, action, reaction or legendary action
///
/// Serialized as a `[name, description]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntry {
    pub name: String,
    pub description: String,
}

impl NamedEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Serialize for NamedEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [&self.name, &self.description].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NamedEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEntry {
            Pair(Vec<String>),
            Object {
                name: String,
                #[serde(default)]
                description: String,
            },
        }

        match RawEntry::deserialize(deserializer)? {
            RawEntry::Pair(parts) => {
                let mut parts = parts.into_iter();
                let name = parts.next().unwrap_or_default();
                let description = parts.collect::<Vec<_>>().join(" ");
                Ok(Self { name, description })
            }
            RawEntry::Object { name, description } => Ok(Self { name, description }),
        }
    }
}

/// How an NPC's power is expressed on its stat block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerRating {
    ChallengeRating(String),
    CharacterLevel(i32),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(rename = "type", default)]
    pub creature_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default)]
    pub alignment: String,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub ac: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub hp: i32,
    #[serde(default)]
    pub hit_dice: String,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub stats: AbilityScores,
    #[serde(rename = "proficiencyBonus", default, deserialize_with = "lenient_string")]
    pub proficiency_bonus: String,
    #[serde(default)]
    pub saves: Vec<Bonus>,
    #[serde(rename = "skillsaves", default)]
    pub skills: Vec<Bonus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_vulnerabilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_resistances: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_immunities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_immunities: Option<String>,
    #[serde(default)]
    pub senses: String,
    #[serde(default)]
    pub languages: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cr: Option<String>,
    #[serde(
        rename = "characterLevel",
        default,
        deserialize_with = "lenient_opt_i32",
        skip_serializing_if = "Option::is_none"
    )]
    pub character_level: Option<i32>,
    #[serde(default)]
    pub traits: Vec<NamedEntry>,
    #[serde(default)]
    pub actions: Vec<NamedEntry>,
    #[serde(default)]
    pub reactions: Vec<NamedEntry>,
    #[serde(default)]
    pub legendary_actions: Vec<NamedEntry>,
    #[serde(default)]
    pub spells: Vec<String>,
}

impl StatBlock {
    /// `Medium humanoid (elf), chaotic good`
    pub fn headline(&self) -> String {
        let subtype = self
            .subtype
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        format!(
            "{} {}{}, {}",
            self.size, self.creature_type, subtype, self.alignment
        )
    }

    /// The rating shown for this NPC: CR for enemies, level for everyone else
    pub fn power_rating(&self, npc_type: NpcType) -> Option<PowerRating> {
        if npc_type.uses_challenge_rating() {
            self.cr
                .clone()
                .filter(|cr| !cr.is_empty())
                .map(PowerRating::ChallengeRating)
        } else {
            self.character_level
                .filter(|level| *level > 0)
                .map(PowerRating::CharacterLevel)
        }
    }
}

fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(lenient_opt_i32(deserializer)?.unwrap_or_default())
}

fn lenient_opt_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.map(|v| v.round() as i32))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}
