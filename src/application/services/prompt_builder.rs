//! Prompt building functions for the generation requests
//!
//! Every prompt is a translated template with `{placeholder}` substitution,
//! so wording follows the request language while the inputs stay the same.

use super::Translator;
use crate::application::dto::{ItemPrompt, ScenarioPrompt};
use crate::domain::entities::{GeneratedItem, GeneratedNpc, GeneratedScenario};
use crate::domain::value_objects::{CreatureType, Language, NpcGender, NpcType};

/// Text prompt for an item, specific or random
pub fn item_prompt(translator: &Translator, language: Language, prompt: &ItemPrompt) -> String {
    match prompt {
        ItemPrompt::Specific {
            name,
            is_magical,
            rarity,
        } => {
            let magical = translator.text(
                language,
                if *is_magical { "magical" } else { "notMagical" },
            );
            translator.t(
                language,
                "prompts.itemSpecific",
                &[("name", name), ("isMagical", &magical), ("rarity", rarity)],
            )
        }
        ItemPrompt::Random => translator.text(language, "prompts.itemRandom"),
    }
}

pub fn item_image_prompt(
    translator: &Translator,
    language: Language,
    item: &GeneratedItem,
) -> String {
    translator.t(
        language,
        "prompts.itemImage",
        &[("name", &item.name), ("description", &item.description)],
    )
}

pub fn scenario_prompt(
    translator: &Translator,
    language: Language,
    prompt: &ScenarioPrompt,
) -> String {
    match prompt {
        ScenarioPrompt::Specific { name, description } => translator.t(
            language,
            "prompts.scenarioSpecific",
            &[("name", name), ("description", description)],
        ),
        ScenarioPrompt::Random => translator.text(language, "prompts.scenarioRandom"),
    }
}

pub fn scenario_image_prompt(
    translator: &Translator,
    language: Language,
    scenario: &GeneratedScenario,
) -> String {
    translator.t(
        language,
        "prompts.scenarioImage",
        &[
            ("name", &scenario.name),
            ("description", &scenario.detailed_description),
        ],
    )
}

pub fn npc_prompt(
    translator: &Translator,
    language: Language,
    npc_type: NpcType,
    gender: NpcGender,
) -> String {
    let npc_type = translator.text(language, &npc_type.prompt_key());
    let gender = translator.text(language, &gender.label_key());
    translator.t(
        language,
        "prompts.npcRandom",
        &[("npcType", &npc_type), ("gender", &gender)],
    )
}

pub fn npc_portrait_prompt(
    translator: &Translator,
    language: Language,
    npc: &GeneratedNpc,
) -> String {
    translator.t(
        language,
        "prompts.npcImage",
        &[
            ("name", &npc.name),
            ("race", &npc.race),
            ("class", &npc.class),
            ("description", &npc.description),
            ("scenery", &npc.scenery),
        ],
    )
}

/// Instruction for the painted miniature render
///
/// The creature type goes in as its raw code (`enemy`, `npc`...), which is
/// what the color legend inside the templates refers to.
pub fn miniature_prompt(
    translator: &Translator,
    language: Language,
    creature_name: &str,
    creature_type: CreatureType,
    scenery: &str,
) -> String {
    translator.t(
        language,
        "prompts.miniature",
        &[
            ("creatureName", creature_name),
            ("creatureType", creature_type.as_str()),
            ("scenery", scenery),
        ],
    )
}

pub fn token_prompt(
    translator: &Translator,
    language: Language,
    creature_name: &str,
    creature_type: CreatureType,
) -> String {
    translator.t(
        language,
        "prompts.token",
        &[
            ("creatureName", creature_name),
            ("creatureType", creature_type.as_str()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::embedded().unwrap()
    }

    #[test]
    fn test_specific_item_prompt_substitutes_fields() {
        let t = translator();
        let prompt = item_prompt(
            &t,
            Language::En,
            &ItemPrompt::Specific {
                name: "Sun Blade".into(),
                is_magical: true,
                rarity: "Rare".into(),
            },
        );
        assert!(prompt.contains("\"Sun Blade\""));
        assert!(prompt.contains("Magical"));
        assert!(prompt.contains("Rare"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_random_prompts_come_from_their_own_templates() {
        let t = translator();
        assert_eq!(
            item_prompt(&t, Language::En, &ItemPrompt::Random),
            t.text(Language::En, "prompts.itemRandom")
        );
        assert_eq!(
            scenario_prompt(&t, Language::Pt, &ScenarioPrompt::Random),
            t.text(Language::Pt, "prompts.scenarioRandom")
        );
    }

    #[test]
    fn test_npc_prompt_uses_translated_phrases() {
        let t = translator();
        let prompt = npc_prompt(&t, Language::En, NpcType::Enemy, NpcGender::Female);
        assert!(prompt.contains(&t.text(Language::En, "npcType.enemy")));
        assert!(prompt.contains(&t.text(Language::En, "gender.female")));
    }

    #[test]
    fn test_language_changes_wording_not_inputs() {
        let t = translator();
        let en = miniature_prompt(&t, Language::En, "Goblin", CreatureType::Enemy, "swamp");
        let pt = miniature_prompt(&t, Language::Pt, "Goblin", CreatureType::Enemy, "swamp");
        assert_ne!(en, pt);
        for prompt in [&en, &pt] {
            assert!(prompt.contains("Goblin"));
            assert!(prompt.contains("swamp"));
            assert!(prompt.contains("enemy"));
        }

        let token = token_prompt(&t, Language::En, "Goblin", CreatureType::Npc);
        assert!(token.contains("Goblin") && token.contains("npc"));
    }
}
