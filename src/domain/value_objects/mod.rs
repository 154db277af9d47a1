//! Value objects - Immutable objects defined by their attributes

mod asset_kind;
mod aspect_ratio;
mod creature;
mod data_url;
mod ids;
mod language;

pub use asset_kind::{AssetKind, ImageSlot};
pub use aspect_ratio::AspectRatio;
pub use creature::{CreatureType, NpcGender, NpcType};
pub use data_url::{DataUrl, DataUrlError, PNG_MIME};
pub use ids::GenerationId;
pub use language::Language;
