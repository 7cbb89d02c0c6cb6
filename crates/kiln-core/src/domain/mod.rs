// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Kiln.
//!
//! Pure scaffold-generation logic. All I/O, timing and progress reporting
//! are handled by the application layer through ports.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or clock access
//! - **No tracing**: Observability belongs to the layers above
//! - **Immutable results**: A `ScaffoldResult` is never mutated once built
//! - **Data-driven**: Every compatibility rule lives in the catalog tables
//!
// Public API - what the world sees
pub mod catalog;
pub mod compatibility;
pub mod composer;
pub mod entities;
pub mod error;
pub mod export;
pub mod value_objects;

// Re-exports for convenience
pub use catalog::{FeatureDef, FrameworkDef};
pub use composer::{ComposeOptions, compose, compose_resolved};
pub use entities::{
    FeatureSelection, ResolvedRequest, ScaffoldRequest, ScaffoldResult, SelectionState,
};
pub use error::{DomainError, ErrorCategory};
pub use export::{ExportArtifact, encode};
pub use value_objects::{PlatformCategory, WrapperKind};
