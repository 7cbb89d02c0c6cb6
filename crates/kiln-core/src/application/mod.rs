//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService)
//! - **Progress**: The cancellable progress emitter run alongside generation
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! composition logic itself. All of that lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod progress;
pub mod services;

// Re-export main services
pub use services::{
    FeatureInfo,   // DTO for feature listings
    FrameworkInfo, // DTO for framework listings
    GenerationService,
};

// Re-export port traits (for adapter implementation)
pub use ports::ArtifactWriter;

pub use error::ApplicationError;
pub use progress::{ProgressCanceller, ProgressConfig, ProgressEmitter, ProgressPhase, ProgressSink};
