//! Application layer - Generation use cases
//!
//! This layer contains:
//! - Ports: the generative AI boundary
//! - Services: translation, prompt assembly, generation orchestration, views
//! - DTOs: request and response shapes for the HTTP API

pub mod dto;
pub mod ports;
pub mod services;
