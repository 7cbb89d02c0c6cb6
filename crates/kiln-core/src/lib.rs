//! Kiln Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kiln
//! scaffold generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kiln-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, ProgressEmitter)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Driven: ArtifactWriter)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kiln-adapters (Infrastructure)      │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Catalog, Compatibility, Composer,     │
//! │   Export Encoder)                       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kiln_core::prelude::*;
//!
//! let request = ScaffoldRequest::new("My App", PlatformCategory::Website)
//!     .with_framework("react")
//!     .with_features(["auth", "theme"]);
//!
//! let result = compose(&request, &ComposeOptions::default()).unwrap();
//! assert!(result.text().contains("// Features: Theming System, Authentication"));
//! assert_eq!(result.suggested_filename(), "my-app.jsx");
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FeatureInfo, FrameworkInfo, GenerationService, ProgressEmitter, ports::ArtifactWriter,
    };
    pub use crate::domain::{
        ComposeOptions, ExportArtifact, FeatureSelection, PlatformCategory, ScaffoldRequest,
        ScaffoldResult, SelectionState, compose, encode,
    };
    pub use crate::error::{KilnError, KilnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
