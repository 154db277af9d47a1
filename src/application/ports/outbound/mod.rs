//! Outbound ports - Interfaces that the application requires from external systems

mod generative_port;

pub use generative_port::{
    GenerativeAiPort, ImageEditRequest, ImageGenerationRequest, SourceImage,
    TextGenerationRequest,
};
