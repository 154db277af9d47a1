//! Domain layer - Generated asset model with no I/O
//!
//! This layer contains:
//! - Entities: items, scenarios, NPCs with stat blocks, miniature sets
//! - Value Objects: language, aspect ratio, creature types, data URLs

pub mod entities;
pub mod value_objects;
