// ============================================================================
// domain/error.rs - REQUEST VALIDATION AND LOOKUP ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers keep them alongside the rejected request)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Nothing here is fatal: every variant is fixed by correcting the input
/// and generating again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("project name must not be empty")]
    EmptyProjectName,

    #[error("no framework selected")]
    MissingFramework,

    // ========================================================================
    // Compatibility Errors (409-level equivalent)
    // ========================================================================
    #[error("framework '{framework}' does not support the {platform} platform (supports: {supported})")]
    UnsupportedPlatform {
        framework: String,
        platform: String,
        supported: String,
    },

    #[error("feature '{feature}' is not available for framework '{framework}'")]
    IncompatibleFeature { feature: String, framework: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("unknown framework '{id}'")]
    UnknownFramework { id: String },

    #[error("unknown feature '{id}'")]
    UnknownFeature { id: String },

    #[error("unknown platform '{platform}'")]
    UnknownPlatform { platform: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyProjectName => vec![
                "Provide a project name, e.g. \"My App\"".into(),
                "Whitespace-only names are rejected".into(),
            ],
            Self::MissingFramework => vec![
                "Select a framework for the chosen platform".into(),
                "Try: kiln list frameworks --platform website".into(),
            ],
            Self::UnsupportedPlatform {
                platform,
                supported,
                ..
            } => vec![
                format!("This framework targets: {supported}"),
                format!("Try: kiln list frameworks --platform {platform}"),
            ],
            Self::IncompatibleFeature { framework, .. } => vec![
                format!("Remove the feature or pick another framework than '{framework}'"),
                format!("Try: kiln list features --framework {framework}"),
            ],
            Self::UnknownFramework { .. } => vec![
                "Check the framework id for typos".into(),
                "Try: kiln list frameworks".into(),
            ],
            Self::UnknownFeature { .. } => vec![
                "Check the feature id for typos".into(),
                "Try: kiln list features".into(),
            ],
            Self::UnknownPlatform { .. } => {
                vec!["Supported platforms: website, mobile, desktop".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyProjectName | Self::MissingFramework => ErrorCategory::Validation,
            Self::UnsupportedPlatform { .. } | Self::IncompatibleFeature { .. } => {
                ErrorCategory::Compatibility
            }
            Self::UnknownFramework { .. }
            | Self::UnknownFeature { .. }
            | Self::UnknownPlatform { .. } => ErrorCategory::NotFound,
        }
    }

    /// The request was well-formed against the catalog but violates one of
    /// the request invariants (empty name, no framework, incompatibility).
    pub fn is_validation(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Compatibility
        )
    }

    /// An id that does not exist in the catalog at all.
    pub fn is_unknown_id(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
}
