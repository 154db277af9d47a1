//! Domain entities - Generated assets

mod item;
mod miniature;
mod npc;
mod scenario;
mod stat_block;

pub use item::{GeneratedItem, ItemPackage};
pub use miniature::MiniatureSet;
pub use npc::{GeneratedNpc, NpcPackage};
pub use scenario::{GeneratedScenario, ScenarioPackage};
pub use stat_block::{
    ability_modifier, format_bonuses, signed, Ability, AbilityScores, Bonus, NamedEntry,
    PowerRating, StatBlock,
};
