//! The `ScaffoldRequest` value and its validated form.
//!
//! A `ScaffoldRequest` is built fresh for every generation attempt from
//! whatever the caller currently has selected. It may be inconsistent;
//! [`ScaffoldRequest::resolve`] is the single gate that turns it into a
//! [`ResolvedRequest`] the composer can trust.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the
//! responsibility of the application and CLI layers, not the domain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::{self, FeatureDef, FrameworkDef},
    entities::FeatureSelection,
    error::DomainError,
    value_objects::{PlatformCategory, WrapperKind},
};

// ── Unvalidated request ──────────────────────────────────────────────────────

/// Everything a caller chose before pressing "generate".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldRequest {
    project_name: String,
    platform: PlatformCategory,
    framework_id: Option<String>,
    features: FeatureSelection,
}

impl ScaffoldRequest {
    /// Start a request with no framework and no features.
    pub fn new(project_name: impl Into<String>, platform: PlatformCategory) -> Self {
        Self {
            project_name: project_name.into(),
            platform,
            framework_id: None,
            features: FeatureSelection::new(),
        }
    }

    pub fn with_framework(mut self, framework_id: impl Into<String>) -> Self {
        self.framework_id = Some(framework_id.into());
        self
    }

    pub fn with_feature(mut self, feature_id: impl AsRef<str>) -> Self {
        self.features.insert(feature_id);
        self
    }

    pub fn with_features<I, S>(mut self, feature_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.features.extend(feature_ids);
        self
    }

    pub fn with_selection(mut self, features: FeatureSelection) -> Self {
        self.features = features;
        self
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub const fn platform(&self) -> PlatformCategory {
        self.platform
    }

    pub fn framework_id(&self) -> Option<&str> {
        self.framework_id.as_deref()
    }

    pub fn features(&self) -> &FeatureSelection {
        &self.features
    }

    /// Check both request invariants and resolve every id.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// project name, framework presence, framework existence, framework
    /// platform support, then each feature (existence, compatibility) in
    /// selection order.
    pub fn resolve(&self) -> Result<ResolvedRequest, DomainError> {
        let project_name = self.project_name.trim();
        if project_name.is_empty() {
            return Err(DomainError::EmptyProjectName);
        }

        let framework_id = self
            .framework_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(DomainError::MissingFramework)?;

        let framework = catalog::resolve_framework(framework_id)?;
        if !framework.supports(self.platform) {
            return Err(DomainError::UnsupportedPlatform {
                framework: framework.id.to_string(),
                platform: self.platform.to_string(),
                supported: framework
                    .supported_platforms
                    .iter()
                    .map(PlatformCategory::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let mut features: Vec<&'static FeatureDef> = Vec::with_capacity(self.features.len());
        for id in self.features.iter() {
            let feature = catalog::resolve_feature(id)?;
            if features.iter().any(|seen| seen.id == feature.id) {
                continue;
            }
            if !feature.is_compatible_with(framework.id) {
                return Err(DomainError::IncompatibleFeature {
                    feature: feature.id.to_string(),
                    framework: framework.id.to_string(),
                });
            }
            features.push(feature);
        }
        features.sort_by_key(|def| catalog::feature_rank(def.id));

        Ok(ResolvedRequest {
            project_name: project_name.to_string(),
            platform: self.platform,
            framework,
            features,
        })
    }
}

impl fmt::Display for ScaffoldRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.project_name.trim(),
            self.platform,
            self.framework_id.as_deref().unwrap_or("no framework")
        )
    }
}

// ── Validated request ────────────────────────────────────────────────────────

/// A request whose ids all exist and are mutually compatible.
///
/// Only [`ScaffoldRequest::resolve`] constructs this, so holding one is proof
/// that both request invariants hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    project_name: String,
    platform: PlatformCategory,
    framework: &'static FrameworkDef,
    features: Vec<&'static FeatureDef>,
}

impl ResolvedRequest {
    /// The trimmed project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub const fn platform(&self) -> PlatformCategory {
        self.platform
    }

    pub const fn framework(&self) -> &'static FrameworkDef {
        self.framework
    }

    /// Selected features in catalog order.
    pub fn features(&self) -> &[&'static FeatureDef] {
        &self.features
    }

    /// Selected wrapper kinds, outermost first.
    pub fn wrappers(&self) -> Vec<WrapperKind> {
        let mut kinds: Vec<_> = self.features.iter().filter_map(|f| f.wrapper).collect();
        kinds.sort();
        kinds
    }
}
