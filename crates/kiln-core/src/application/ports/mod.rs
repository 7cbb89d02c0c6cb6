//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiln-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ArtifactWriter`: delivering an exported scaffold as a file
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `ProgressSink`: receives the progress stream (see `application::progress`)

use std::path::Path;

use crate::error::KilnResult;

/// Port for delivering export artifacts.
///
/// Implemented by:
/// - `kiln_adapters::filesystem::LocalFilesystem` (production)
/// - `kiln_adapters::filesystem::MemoryFilesystem` (testing)
pub trait ArtifactWriter: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// Write `payload` to `path`, replacing any existing file.
    fn write_bytes(&self, path: &Path, payload: &[u8]) -> KilnResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
