//! Response schemas that constrain the text model output
//!
//! Written in the OpenAPI subset accepted by the Gemini `responseSchema`
//! field (upper-case type names).

use serde_json::{json, Value};

pub fn item_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "The name of the item." },
            "description": { "type": "STRING", "description": "A detailed physical and historical description of the item." },
            "effect": { "type": "STRING", "description": "The mechanical effect of the item in a TTRPG context." },
            "value": { "type": "STRING", "description": "The estimated value of the item in gold pieces (e.g., '50 gp')." },
            "rarity": { "type": "STRING", "description": "The rarity of the item." },
            "isMagical": { "type": "BOOLEAN", "description": "Whether the item is magical." },
            "attunement": { "type": "BOOLEAN", "description": "Whether the item requires attunement." }
        },
        "required": ["name", "description", "effect", "value", "rarity", "isMagical", "attunement"]
    })
}

pub fn scenario_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "The evocative name of the scenario." },
            "detailedDescription": { "type": "STRING", "description": "A detailed description of the scenario, including sensory details, potential plot hooks, and notable features." }
        },
        "required": ["name", "detailedDescription"]
    })
}

fn string_pairs() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "ARRAY", "items": { "type": "STRING" } } })
}

fn named_values() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "value": { "type": "NUMBER" }
            }
        }
    })
}

pub fn stat_block_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "size": { "type": "STRING" },
            "type": { "type": "STRING" },
            "subtype": { "type": "STRING" },
            "alignment": { "type": "STRING" },
            "ac": { "type": "NUMBER" },
            "hp": { "type": "NUMBER" },
            "hit_dice": { "type": "STRING" },
            "speed": { "type": "STRING" },
            "stats": { "type": "ARRAY", "items": { "type": "NUMBER" } },
            "proficiencyBonus": { "type": "STRING" },
            "saves": named_values(),
            "skillsaves": named_values(),
            "damage_vulnerabilities": { "type": "STRING" },
            "damage_resistances": { "type": "STRING" },
            "damage_immunities": { "type": "STRING" },
            "condition_immunities": { "type": "STRING" },
            "senses": { "type": "STRING" },
            "languages": { "type": "STRING" },
            "cr": { "type": "STRING" },
            "characterLevel": { "type": "NUMBER" },
            "traits": string_pairs(),
            "actions": string_pairs(),
            "reactions": string_pairs(),
            "legendary_actions": string_pairs(),
            "spells": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

pub fn npc_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "npcType": { "type": "STRING", "enum": ["ally", "neutral", "enemy"] },
            "race": { "type": "STRING" },
            "class": { "type": "STRING" },
            "gender": { "type": "STRING" },
            "age": { "type": "STRING" },
            "description": { "type": "STRING" },
            "personality": { "type": "STRING" },
            "belongings": { "type": "STRING" },
            "scenery": { "type": "STRING" },
            "statBlock": stat_block_schema()
        },
        "required": [
            "name", "npcType", "race", "class", "gender", "age",
            "description", "personality", "belongings", "scenery", "statBlock"
        ]
    })
}
