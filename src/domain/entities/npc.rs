//! Generated NPC packages

use serde::{Deserialize, Serialize};

use super::StatBlock;
use crate::domain::value_objects::{DataUrl, NpcType};

/// All textual data generated for an NPC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedNpc {
    pub name: String,
    pub npc_type: NpcType,
    pub race: String,
    pub class: String,
    pub gender: String,
    pub age: String,
    pub description: String,
    pub personality: String,
    pub belongings: String,
    /// Background of the portrait, reused for the miniature base
    pub scenery: String,
    pub stat_block: StatBlock,
}

/// The NPC data together with every image derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcPackage {
    pub npc: GeneratedNpc,
    pub portrait: DataUrl,
    pub miniature: DataUrl,
    pub token: DataUrl,
}
