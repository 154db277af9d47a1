//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize request bodies and turn them into validated specs.

pub mod generation;
pub mod stat_block;
pub mod view;

pub use generation::*;
pub use stat_block::*;
pub use view::*;
