//! Application services - Use case implementations
//!
//! This module contains the application services that implement the use cases
//! of the RPG Toolbox Engine. Services depend on outbound ports only, so the
//! generative provider can be swapped or mocked.

pub mod generation_service;
pub mod prompt_builder;
pub mod schemas;
pub mod translation_service;
pub mod view_service;

// Re-export generation service types
#[allow(unused_imports)]
pub use generation_service::{
    AssetGenerationService, AssetGenerationServiceImpl, GenerationError, GenerationModels,
    GenerationRecipe,
};

// Re-export translation types
#[allow(unused_imports)]
pub use translation_service::{Resolution, Translator};

// Re-export view service types
#[allow(unused_imports)]
pub use view_service::{
    download_file_name, GeneratedAsset, GeneratorView, GeneratorViews, ImageDownload, ViewError,
    ViewPhase,
};
