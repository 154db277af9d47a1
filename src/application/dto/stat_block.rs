//! Display-ready stat block
//!
//! Resolves every label through the translator and applies the presentation
//! rules: modifiers with explicit signs, capitalized bonus names, CR for
//! enemies and character level for everyone else, empty sections dropped.

use serde::Serialize;

use crate::application::services::Translator;
use crate::domain::entities::{format_bonuses, signed, NamedEntry, PowerRating, StatBlock};
use crate::domain::value_objects::{Language, NpcType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityView {
    pub label: String,
    pub score: i32,
    pub modifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub entries: Vec<NamedEntry>,
    /// Free-form lines, used by the spellcasting section
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatBlockView {
    pub name: String,
    pub headline: String,
    pub vitals: Vec<LabeledValue>,
    pub abilities: Vec<AbilityView>,
    pub details: Vec<LabeledValue>,
    pub sections: Vec<SectionView>,
}

impl StatBlockView {
    pub fn render(
        block: &StatBlock,
        npc_type: NpcType,
        translator: &Translator,
        language: Language,
    ) -> Self {
        let label = |key: &str| translator.text(language, &format!("statBlock.{}", key));
        let line = |key: &str, value: String| LabeledValue {
            label: label(key),
            value,
        };

        let hp = if block.hit_dice.is_empty() {
            block.hp.to_string()
        } else {
            format!("{} ({})", block.hp, block.hit_dice)
        };
        let vitals = vec![
            line("ac", block.ac.to_string()),
            line("hp", hp),
            line("speed", block.speed.clone()),
        ];

        let abilities = block
            .stats
            .iter()
            .map(|(ability, score)| AbilityView {
                label: label(ability.key()),
                score,
                modifier: signed(block.stats.modifier(ability)),
            })
            .collect();

        let mut details = Vec::new();
        if !block.saves.is_empty() {
            details.push(line("saves", format_bonuses(&block.saves)));
        }
        if !block.skills.is_empty() {
            details.push(line("skills", format_bonuses(&block.skills)));
        }
        let optional = [
            ("damageVulnerabilities", &block.damage_vulnerabilities),
            ("damageResistances", &block.damage_resistances),
            ("damageImmunities", &block.damage_immunities),
            ("conditionImmunities", &block.condition_immunities),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                details.push(line(key, value.to_string()));
            }
        }
        if !block.senses.is_empty() {
            details.push(line("senses", block.senses.clone()));
        }
        if !block.languages.is_empty() {
            details.push(line("languages", block.languages.clone()));
        }
        match block.power_rating(npc_type) {
            Some(PowerRating::ChallengeRating(cr)) => details.push(line("cr", cr)),
            Some(PowerRating::CharacterLevel(level)) => {
                details.push(line("level", level.to_string()))
            }
            None => {}
        }
        if !block.proficiency_bonus.is_empty() {
            details.push(line("proficiencyBonus", block.proficiency_bonus.clone()));
        }

        let section = |key: &str, entries: &[NamedEntry]| SectionView {
            title: label(key),
            entries: entries.to_vec(),
            lines: Vec::new(),
        };
        let sections = [
            section("traits", &block.traits),
            SectionView {
                title: label("spells"),
                entries: Vec::new(),
                lines: block.spells.clone(),
            },
            section("actions", &block.actions),
            section("reactions", &block.reactions),
            section("legendaryActions", &block.legendary_actions),
        ]
        .into_iter()
        .filter(|s| !s.entries.is_empty() || !s.lines.is_empty())
        .collect();

        Self {
            name: block.name.clone(),
            headline: block.headline(),
            vitals,
            abilities,
            details,
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AbilityScores, Bonus};

    fn block() -> StatBlock {
        StatBlock {
            name: "Captain Mirela".into(),
            size: "Medium".into(),
            creature_type: "humanoid".into(),
            subtype: Some("human".into()),
            alignment: "lawful neutral".into(),
            ac: 16,
            hp: 58,
            hit_dice: "9d8+18".into(),
            speed: "30 ft.".into(),
            stats: AbilityScores::new([16, 9, 14, 10, 12, 8]),
            saves: vec![Bonus {
                name: "str".into(),
                value: 5,
            }],
            cr: Some("3".into()),
            character_level: Some(5),
            actions: vec![NamedEntry::new("Longsword", "Melee Weapon Attack: +5 to hit.")],
            ..Default::default()
        }
    }

    fn translator() -> Translator {
        Translator::embedded().unwrap()
    }

    #[test]
    fn test_abilities_are_labelled_in_order_with_signed_modifiers() {
        let view = StatBlockView::render(&block(), NpcType::Enemy, &translator(), Language::En);
        let rendered: Vec<_> = view
            .abilities
            .iter()
            .map(|a| format!("{} {} ({})", a.label, a.score, a.modifier))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "STR 16 (+3)",
                "DEX 9 (-1)",
                "CON 14 (+2)",
                "INT 10 (+0)",
                "WIS 12 (+1)",
                "CHA 8 (-1)"
            ]
        );
        assert_eq!(view.vitals[1].value, "58 (9d8+18)");
        assert_eq!(view.headline, "Medium humanoid (human), lawful neutral");
    }

    #[test]
    fn test_challenge_rating_only_for_enemies() {
        let t = translator();
        let enemy = StatBlockView::render(&block(), NpcType::Enemy, &t, Language::En);
        assert!(enemy.details.iter().any(|d| d.label == "Challenge" && d.value == "3"));
        assert!(!enemy.details.iter().any(|d| d.label == "Level"));

        let ally = StatBlockView::render(&block(), NpcType::Ally, &t, Language::En);
        assert!(ally.details.iter().any(|d| d.label == "Level" && d.value == "5"));
        assert!(!ally.details.iter().any(|d| d.label == "Challenge"));
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let view = StatBlockView::render(&block(), NpcType::Neutral, &translator(), Language::En);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].title, "Actions");
        assert_eq!(view.details[0].value, "Str +5");
    }

    #[test]
    fn test_labels_follow_language() {
        let en = StatBlockView::render(&block(), NpcType::Enemy, &translator(), Language::En);
        let pt = StatBlockView::render(&block(), NpcType::Enemy, &translator(), Language::Pt);
        assert_ne!(en.vitals[0].label, pt.vitals[0].label);
        assert_eq!(en.abilities[0].score, pt.abilities[0].score);
    }
}
