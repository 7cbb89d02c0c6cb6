//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a scaffold" or "export it".

pub mod generation_service;

pub use generation_service::{DEFAULT_SETTLE, FeatureInfo, FrameworkInfo, GenerationService};
