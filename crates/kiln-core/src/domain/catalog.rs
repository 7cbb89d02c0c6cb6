//! Framework and feature catalog.
//!
//! # Design Rationale
//!
//! Each framework and each feature is described exactly once, by a static
//! [`FrameworkDef`] / [`FeatureDef`] entry. Every compatibility query,
//! every listing, and every id lookup is a table scan over these two
//! registries. Nothing else in the crate hard-codes which framework
//! supports which platform or feature.
//!
//! # Ordering
//!
//! Declaration order is significant. It is the order listings are shown
//! in, the order the compatibility filter preserves, and the order feature
//! names appear in a scaffold header.
//!
//! # Adding a New Framework
//!
//! 1. Add one [`FrameworkDef`] entry to [`FRAMEWORK_REGISTRY`]
//! 2. Add its id to the `compatible_frameworks` of the features it supports
//! 3. Register a template in `composer::templates` (otherwise the generic
//!    template is used)

use crate::domain::{
    error::DomainError,
    value_objects::{PlatformCategory, WrapperKind},
};

// ── Framework definitions ────────────────────────────────────────────────────

/// Everything the engine needs to know about one framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkDef {
    /// Unique, lowercase identifier.
    pub id: &'static str,

    /// Name shown in listings and in the scaffold header.
    pub display_name: &'static str,

    /// Platform categories this framework can target.
    pub supported_platforms: &'static [PlatformCategory],

    /// Alternative spellings accepted from user input.
    pub aliases: &'static [&'static str],
}

impl FrameworkDef {
    pub fn supports(&self, platform: PlatformCategory) -> bool {
        self.supported_platforms.contains(&platform)
    }

    fn answers_to(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

/// Single source of truth for framework capabilities.
pub static FRAMEWORK_REGISTRY: &[FrameworkDef] = &[
    // ── Website ──────────────────────────────────────────────────────────────
    FrameworkDef {
        id: "react",
        display_name: "React",
        supported_platforms: &[PlatformCategory::Website],
        aliases: &["reactjs"],
    },
    FrameworkDef {
        id: "vue",
        display_name: "Vue.js",
        supported_platforms: &[PlatformCategory::Website],
        aliases: &["vuejs"],
    },
    FrameworkDef {
        id: "angular",
        display_name: "Angular",
        supported_platforms: &[PlatformCategory::Website],
        aliases: &[],
    },
    FrameworkDef {
        id: "svelte",
        display_name: "Svelte",
        supported_platforms: &[PlatformCategory::Website],
        aliases: &[],
    },
    FrameworkDef {
        id: "next",
        display_name: "Next.js",
        supported_platforms: &[PlatformCategory::Website],
        aliases: &["nextjs"],
    },
    // ── Mobile ───────────────────────────────────────────────────────────────
    FrameworkDef {
        id: "flutter",
        display_name: "Flutter",
        supported_platforms: &[PlatformCategory::Mobile],
        aliases: &[],
    },
    FrameworkDef {
        id: "react-native",
        display_name: "React Native",
        supported_platforms: &[PlatformCategory::Mobile],
        aliases: &["reactnative", "rn"],
    },
    FrameworkDef {
        id: "ionic",
        display_name: "Ionic",
        supported_platforms: &[PlatformCategory::Mobile],
        aliases: &[],
    },
    // ── Desktop ──────────────────────────────────────────────────────────────
    FrameworkDef {
        id: "electron",
        display_name: "Electron",
        supported_platforms: &[PlatformCategory::Desktop],
        aliases: &[],
    },
    FrameworkDef {
        id: "tauri",
        display_name: "Tauri",
        supported_platforms: &[PlatformCategory::Desktop],
        aliases: &[],
    },
];

// ── Feature definitions ──────────────────────────────────────────────────────

/// Everything the engine needs to know about one optional feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDef {
    /// Unique, lowercase identifier.
    pub id: &'static str,

    pub display_name: &'static str,

    pub description: &'static str,

    /// Ids of the frameworks this feature can be generated for.
    pub compatible_frameworks: &'static [&'static str],

    /// `Some` when the feature is rendered as a construct surrounding the
    /// application root; `None` for marker-only features.
    pub wrapper: Option<WrapperKind>,

    /// Alternative spellings accepted from user input.
    pub aliases: &'static [&'static str],
}

impl FeatureDef {
    pub fn is_compatible_with(&self, framework_id: &str) -> bool {
        self.compatible_frameworks.contains(&framework_id)
    }

    pub const fn is_wrappable(&self) -> bool {
        self.wrapper.is_some()
    }

    fn answers_to(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

// Svelte is deliberately absent from every list: no feature is offered for it.
const GENERAL: &[&str] = &[
    "react",
    "vue",
    "angular",
    "next",
    "flutter",
    "react-native",
    "ionic",
    "electron",
    "tauri",
];
const BROWSER_ONLY: &[&str] = &["react", "vue", "angular", "next"];
const NON_DESKTOP: &[&str] = &[
    "react",
    "vue",
    "angular",
    "next",
    "flutter",
    "react-native",
    "ionic",
];

/// Single source of truth for optional features.
///
/// The three wrappable features come first, in nesting order, so that the
/// header's catalog-ordered feature list reads outermost to innermost.
pub static FEATURE_REGISTRY: &[FeatureDef] = &[
    FeatureDef {
        id: "theme",
        display_name: "Theming System",
        description: "Light and dark mode support",
        compatible_frameworks: GENERAL,
        wrapper: Some(WrapperKind::Theme),
        aliases: &["theming"],
    },
    FeatureDef {
        id: "auth",
        display_name: "Authentication",
        description: "User login and registration",
        compatible_frameworks: GENERAL,
        wrapper: Some(WrapperKind::Auth),
        aliases: &["authentication"],
    },
    FeatureDef {
        id: "db",
        display_name: "Database Integration",
        description: "Connect to a database",
        compatible_frameworks: GENERAL,
        wrapper: Some(WrapperKind::Database),
        aliases: &["database"],
    },
    FeatureDef {
        id: "api",
        display_name: "API Integration",
        description: "Connect to external APIs",
        compatible_frameworks: GENERAL,
        wrapper: None,
        aliases: &[],
    },
    FeatureDef {
        id: "pwa",
        display_name: "PWA Support",
        description: "Progressive Web App capabilities",
        compatible_frameworks: BROWSER_ONLY,
        wrapper: None,
        aliases: &[],
    },
    FeatureDef {
        id: "offline",
        display_name: "Offline Support",
        description: "Work without internet connection",
        compatible_frameworks: GENERAL,
        wrapper: None,
        aliases: &[],
    },
    FeatureDef {
        id: "i18n",
        display_name: "Internationalization",
        description: "Multi-language support",
        compatible_frameworks: GENERAL,
        wrapper: None,
        aliases: &["internationalization"],
    },
    FeatureDef {
        id: "analytics",
        display_name: "Analytics",
        description: "Track user behavior",
        compatible_frameworks: NON_DESKTOP,
        wrapper: None,
        aliases: &[],
    },
    FeatureDef {
        id: "notifications",
        display_name: "Notifications",
        description: "Push notifications",
        compatible_frameworks: GENERAL,
        wrapper: None,
        aliases: &["push"],
    },
    FeatureDef {
        id: "payment",
        display_name: "Payment Processing",
        description: "Process payments",
        compatible_frameworks: GENERAL,
        wrapper: None,
        aliases: &["payments"],
    },
];

// ── Registry lookup API ───────────────────────────────────────────────────────
//
// These functions are the ONLY entry points for catalog queries.

/// All frameworks, in canonical order.
pub fn list_frameworks() -> &'static [FrameworkDef] {
    FRAMEWORK_REGISTRY
}

/// All features, in canonical order.
pub fn list_features() -> &'static [FeatureDef] {
    FEATURE_REGISTRY
}

/// Find a framework by id or alias (case-insensitive).
pub fn find_framework(id: &str) -> Option<&'static FrameworkDef> {
    let id = id.trim();
    FRAMEWORK_REGISTRY.iter().find(|def| def.answers_to(id))
}

/// Find a feature by id or alias (case-insensitive).
pub fn find_feature(id: &str) -> Option<&'static FeatureDef> {
    let id = id.trim();
    FEATURE_REGISTRY.iter().find(|def| def.answers_to(id))
}

/// Like [`find_framework`], but an unknown id is an error.
pub fn resolve_framework(id: &str) -> Result<&'static FrameworkDef, DomainError> {
    find_framework(id).ok_or_else(|| DomainError::UnknownFramework { id: id.to_string() })
}

/// Like [`find_feature`], but an unknown id is an error.
pub fn resolve_feature(id: &str) -> Result<&'static FeatureDef, DomainError> {
    find_feature(id).ok_or_else(|| DomainError::UnknownFeature { id: id.to_string() })
}

/// Position of a feature in the catalog; used to sort selections.
pub(crate) fn feature_rank(id: &str) -> usize {
    FEATURE_REGISTRY
        .iter()
        .position(|def| def.id == id)
        .unwrap_or(usize::MAX)
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    let mut names: Vec<&str> = Vec::new();
    for def in FRAMEWORK_REGISTRY {
        assert!(
            !def.supported_platforms.is_empty(),
            "Framework {:?} supports no platform",
            def.id
        );
        for name in std::iter::once(&def.id).chain(def.aliases) {
            assert!(
                !names.contains(name),
                "Framework id or alias {name:?} registered twice"
            );
            names.push(*name);
        }
    }

    let mut feature_names: Vec<&str> = Vec::new();
    let mut wrappers: Vec<WrapperKind> = Vec::new();
    for def in FEATURE_REGISTRY {
        for name in std::iter::once(&def.id).chain(def.aliases) {
            assert!(
                !feature_names.contains(name),
                "Feature id or alias {name:?} registered twice"
            );
            feature_names.push(*name);
        }

        for fw in def.compatible_frameworks {
            assert!(
                FRAMEWORK_REGISTRY.iter().any(|f| f.id == *fw),
                "Feature {:?} references unregistered framework {:?}",
                def.id,
                fw
            );
        }

        if let Some(kind) = def.wrapper {
            assert!(
                !wrappers.contains(&kind),
                "Wrapper kind {kind:?} claimed by more than one feature"
            );
            wrappers.push(kind);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn listings_are_stable_across_calls() {
        assert_eq!(list_frameworks(), list_frameworks());
        assert_eq!(list_features(), list_features());
        assert_eq!(list_frameworks().len(), 10);
        assert_eq!(list_features().len(), 10);
    }

    #[test]
    fn theme_precedes_auth_in_catalog() {
        assert!(feature_rank("theme") < feature_rank("auth"));
        assert!(feature_rank("auth") < feature_rank("db"));
    }

    #[test]
    fn every_wrapper_kind_has_a_feature() {
        for kind in WrapperKind::NESTING_ORDER {
            assert!(
                FEATURE_REGISTRY.iter().any(|f| f.wrapper == Some(kind)),
                "{kind:?} has no feature"
            );
        }
    }

    #[test]
    fn lookups_accept_aliases_and_case() {
        assert_eq!(find_framework("NextJS").map(|f| f.id), Some("next"));
        assert_eq!(find_framework("rn").map(|f| f.id), Some("react-native"));
        assert_eq!(find_feature("database").map(|f| f.id), Some("db"));
        assert_eq!(find_feature(" Theme ").map(|f| f.id), Some("theme"));
    }

    #[test]
    fn unknown_ids_resolve_to_not_found() {
        assert_eq!(
            resolve_framework("cobol"),
            Err(DomainError::UnknownFramework { id: "cobol".into() })
        );
        assert!(resolve_feature("blockchain").unwrap_err().is_unknown_id());
    }

    #[test]
    fn pwa_is_browser_only() {
        let pwa = find_feature("pwa").unwrap();
        assert!(pwa.is_compatible_with("react"));
        assert!(!pwa.is_compatible_with("flutter"));
        assert!(!pwa.is_compatible_with("electron"));
    }

    #[test]
    fn analytics_skips_desktop() {
        let analytics = find_feature("analytics").unwrap();
        assert!(analytics.is_compatible_with("ionic"));
        assert!(!analytics.is_compatible_with("tauri"));
    }
}
