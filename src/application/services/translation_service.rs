//! Translation lookup over the embedded string tables
//!
//! Keys are dotted paths (`statBlock.ac`, `prompts.itemImage`) resolved one
//! segment at a time. Lookups never fail: anything that cannot be resolved to
//! text degrades to the key itself.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::value_objects::Language;

const EN_TABLE: &str = include_str!("../../../locales/en.json");
const PT_TABLE: &str = include_str!("../../../locales/pt.json");

/// Outcome of walking a dotted key through a string table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Text(&'a str),
    /// A non-textual node such as a list or a nested table
    Value(&'a Value),
    Missing,
}

pub struct Translator {
    tables: HashMap<Language, Value>,
}

impl Translator {
    /// Load the string tables compiled into the binary
    pub fn embedded() -> Result<Self> {
        let en: Value = serde_json::from_str(EN_TABLE).context("Invalid en string table")?;
        let pt: Value = serde_json::from_str(PT_TABLE).context("Invalid pt string table")?;
        Ok(Self::from_tables([(Language::En, en), (Language::Pt, pt)]))
    }

    pub fn from_tables(tables: impl IntoIterator<Item = (Language, Value)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn resolve<'a>(&'a self, language: Language, key: &str) -> Resolution<'a> {
        let Some(mut node) = self.tables.get(&language) else {
            return Resolution::Missing;
        };

        for segment in key.split('.') {
            let next = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(child) => node = child,
                None => return Resolution::Missing,
            }
        }

        match node {
            Value::String(text) => Resolution::Text(text),
            Value::Null | Value::Bool(false) => Resolution::Missing,
            Value::Number(n) if n.as_f64() == Some(0.0) => Resolution::Missing,
            other => Resolution::Value(other),
        }
    }

    /// Translate `key`, substituting every `{placeholder}` with its value
    pub fn t(&self, language: Language, key: &str, replacements: &[(&str, &str)]) -> String {
        match self.resolve(language, key) {
            Resolution::Text(text) => {
                replacements
                    .iter()
                    .fold(text.to_string(), |acc, (placeholder, value)| {
                        acc.replace(&format!("{{{}}}", placeholder), value)
                    })
            }
            Resolution::Value(_) | Resolution::Missing => key.to_string(),
        }
    }

    /// Translate `key` without substitutions
    pub fn text(&self, language: Language, key: &str) -> String {
        self.t(language, key, &[])
    }

    /// A list of strings such as `rarities`; empty when the key is not a list
    pub fn list(&self, language: Language, key: &str) -> Vec<String> {
        match self.resolve(language, key) {
            Resolution::Value(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The whole table for a language, for front ends rendering labels
    pub fn table(&self, language: Language) -> Option<&Value> {
        self.tables.get(&language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translator() -> Translator {
        Translator::embedded().unwrap()
    }

    #[test]
    fn test_simple_and_nested_keys() {
        let t = translator();
        assert_eq!(t.text(Language::En, "magical"), "Magical");
        assert_eq!(t.text(Language::Pt, "magical"), "Mágico");
        assert_eq!(t.text(Language::En, "statBlock.ac"), "Armor Class");
        assert_eq!(t.text(Language::Pt, "gender.female"), "Feminino");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let t = translator();
        assert_eq!(t.text(Language::En, "does.not.exist"), "does.not.exist");
        assert_eq!(t.text(Language::Pt, "statBlock.nope"), "statBlock.nope");
        // Walking past a string leaf
        assert_eq!(t.text(Language::En, "magical.deeper"), "magical.deeper");
        assert_eq!(t.text(Language::En, ""), "");
    }

    #[test]
    fn test_non_text_values_are_returned_raw() {
        let t = translator();
        assert!(matches!(
            t.resolve(Language::En, "rarities"),
            Resolution::Value(Value::Array(_))
        ));
        // Text lookups of a list degrade to the key
        assert_eq!(t.text(Language::En, "rarities"), "rarities");
        assert_eq!(t.list(Language::En, "rarities").len(), 7);
        assert_eq!(t.list(Language::Pt, "rarities")[0], "Comum");
        assert_eq!(t.text(Language::En, "rarities.2"), "Rare");
        assert!(t.list(Language::En, "magical").is_empty());
    }

    #[test]
    fn test_falsy_values_resolve_to_missing() {
        let t = Translator::from_tables([(
            Language::En,
            json!({"flag": false, "nothing": null, "zero": 0, "count": 3}),
        )]);
        assert_eq!(t.resolve(Language::En, "flag"), Resolution::Missing);
        assert_eq!(t.resolve(Language::En, "nothing"), Resolution::Missing);
        assert_eq!(t.resolve(Language::En, "zero"), Resolution::Missing);
        assert!(matches!(t.resolve(Language::En, "count"), Resolution::Value(_)));
        // No table at all for the language
        assert_eq!(t.text(Language::Pt, "flag"), "flag");
    }

    #[test]
    fn test_placeholder_substitution() {
        let t = translator();
        assert_eq!(
            t.t(Language::En, "selectedFile", &[("fileName", "goblin.png")]),
            "Selected: goblin.png"
        );
        // Unknown placeholders are left alone
        assert_eq!(
            t.t(Language::En, "selectedFile", &[("other", "x")]),
            "Selected: {fileName}"
        );

        let repeated = Translator::from_tables([(Language::En, json!({"k": "{a} and {a}"}))]);
        assert_eq!(repeated.t(Language::En, "k", &[("a", "b")]), "b and b");
    }

    #[test]
    fn test_tables_share_prompt_keys() {
        let t = translator();
        for key in [
            "prompts.miniature",
            "prompts.token",
            "prompts.itemSpecific",
            "prompts.itemRandom",
            "prompts.itemImage",
            "prompts.scenarioSpecific",
            "prompts.scenarioRandom",
            "prompts.scenarioImage",
            "prompts.npcRandom",
            "prompts.npcImage",
        ] {
            for language in Language::ALL {
                assert!(
                    matches!(t.resolve(language, key), Resolution::Text(_)),
                    "{} missing for {}",
                    key,
                    language
                );
            }
        }
    }
}
