//! Application layer errors.
//!
//! These errors represent failures in orchestration, not request validity.
//! An invalid request is a `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a generation or an export.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The run was cancelled (or superseded) before it finished.
    #[error("Generation was cancelled")]
    Cancelled,

    /// The progress worker thread could not be started.
    #[error("Could not start progress worker: {reason}")]
    WorkerSpawn { reason: String },

    /// Writing an exported artifact failed.
    #[error("Failed to write {path}: {reason}")]
    ArtifactWrite { path: PathBuf, reason: String },

    /// Refused to overwrite an existing artifact.
    #[error("File already exists at {path}")]
    ArtifactExists { path: PathBuf },

    /// A shared adapter's lock was poisoned by a panicking writer.
    #[error("Artifact writer lock poisoned")]
    WriterLock,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Cancelled => vec!["Run the command again to regenerate".into()],
            Self::ArtifactWrite { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Or print the scaffold instead with --stdout".into(),
            ],
            Self::ArtifactExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite".into(),
                "Choose a different project name or --output directory".into(),
            ],
            Self::WorkerSpawn { .. } => vec![
                "The system may be out of threads".into(),
                "Close other programs and retry".into(),
            ],
            Self::WriterLock => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::ArtifactExists { .. } => ErrorCategory::Validation,
            Self::ArtifactWrite { .. } | Self::WorkerSpawn { .. } | Self::WriterLock => {
                ErrorCategory::Internal
            }
        }
    }
}
