//! Language selection for string tables and prompt templates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported UI / prompt language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Pt,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Pt];

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "pt" => Ok(Self::Pt),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}
