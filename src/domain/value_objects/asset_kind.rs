//! Asset kinds and the image slots each kind produces

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Miniature,
    Item,
    Scenario,
    Npc,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Miniature,
        AssetKind::Item,
        AssetKind::Scenario,
        AssetKind::Npc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miniature => "miniature",
            Self::Item => "item",
            Self::Scenario => "scenario",
            Self::Npc => "npc",
        }
    }

    /// Image slots a finished generation of this kind holds
    pub fn slots(&self) -> &'static [ImageSlot] {
        match self {
            Self::Miniature => &[ImageSlot::Miniature, ImageSlot::Token],
            Self::Item | Self::Scenario => &[ImageSlot::Image],
            Self::Npc => &[ImageSlot::Portrait, ImageSlot::Miniature, ImageSlot::Token],
        }
    }

    /// File name stem used when the generated name sanitizes to nothing
    pub fn fallback_file_stem(&self) -> &'static str {
        match self {
            Self::Miniature => "creature",
            Self::Item => "item",
            Self::Scenario => "scenario",
            Self::Npc => "npc",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miniature" => Ok(Self::Miniature),
            "item" => Ok(Self::Item),
            "scenario" => Ok(Self::Scenario),
            "npc" => Ok(Self::Npc),
            other => Err(format!("Unknown asset kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Image,
    Portrait,
    Miniature,
    Token,
}

impl ImageSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Portrait => "portrait",
            Self::Miniature => "miniature",
            Self::Token => "token",
        }
    }
}

impl FromStr for ImageSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "portrait" => Ok(Self::Portrait),
            "miniature" => Ok(Self::Miniature),
            "token" => Ok(Self::Token),
            other => Err(format!("Unknown image slot: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_per_kind() {
        assert_eq!(AssetKind::Item.slots(), &[ImageSlot::Image]);
        assert_eq!(AssetKind::Npc.slots().len(), 3);
        assert!(AssetKind::Miniature.slots().contains(&ImageSlot::Token));
        assert!(!AssetKind::Scenario.slots().contains(&ImageSlot::Portrait));
    }

    #[test]
    fn test_parse_kind() {
        for kind in AssetKind::ALL {
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }
        assert!("weapon".parse::<AssetKind>().is_err());
    }
}
