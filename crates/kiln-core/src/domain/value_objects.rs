//! Domain value objects: PlatformCategory and WrapperKind.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO catalog logic. Which frameworks target which platform, and
//! which features wrap the application root, lives in `catalog.rs`. This
//! file's only job is to define the types, their string representations,
//! and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PlatformCategory ─────────────────────────────────────────────────────────

/// The kind of application a scaffold targets.
///
/// Closed set. Frameworks declare which categories they support in the
/// catalog; the compatibility filter narrows the framework list by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformCategory {
    Website,
    Mobile,
    Desktop,
}

impl PlatformCategory {
    /// Every category, in display order.
    pub const ALL: [PlatformCategory; 3] = [Self::Website, Self::Mobile, Self::Desktop];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    /// Human label, as shown on a platform tab.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Mobile => "Mobile App",
            Self::Desktop => "Desktop App",
        }
    }
}

impl fmt::Display for PlatformCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "website" | "web" => Ok(Self::Website),
            "mobile" | "mobile-app" => Ok(Self::Mobile),
            "desktop" | "desktop-app" => Ok(Self::Desktop),
            other => Err(DomainError::UnknownPlatform {
                platform: other.to_string(),
            }),
        }
    }
}

// ── WrapperKind ───────────────────────────────────────────────────────────────

/// A feature kind rendered as a construct surrounding the application root.
///
/// The declaration order of the variants IS the nesting order: `Theme` is
/// always outermost and `Database` innermost, for every framework template.
/// `Ord` is derived so that sorting a set of kinds yields that order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WrapperKind {
    Theme,
    Auth,
    Database,
}

impl WrapperKind {
    /// Canonical nesting order, outermost first.
    pub const NESTING_ORDER: [WrapperKind; 3] = [Self::Theme, Self::Auth, Self::Database];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Auth => "auth",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
