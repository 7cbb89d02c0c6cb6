//! Selection state as a front end holds it between generations.
//!
//! Re-selecting a platform or a framework narrows what is still valid. The
//! filter functions in `compatibility` are pure; reconciling the current
//! selection after such a change is this type's job.

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog, compatibility,
    entities::{FeatureSelection, ScaffoldRequest},
    value_objects::PlatformCategory,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    platform: PlatformCategory,
    framework_id: Option<String>,
    features: FeatureSelection,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(PlatformCategory::Website)
    }
}

impl SelectionState {
    pub fn new(platform: PlatformCategory) -> Self {
        Self {
            platform,
            framework_id: None,
            features: FeatureSelection::new(),
        }
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

    /// Switch platform. A framework that cannot target the new platform is
    /// cleared, and with it every selected feature.
    pub fn select_platform(&mut self, platform: PlatformCategory) {
        self.platform = platform;
        let keeps_framework = self
            .framework_id
            .as_deref()
            .and_then(catalog::find_framework)
            .is_some_and(|def| def.supports(platform));
        if !keeps_framework {
            self.framework_id = None;
            self.features = FeatureSelection::new();
        }
    }

    /// Switch framework, silently dropping features it cannot host.
    ///
    /// An id unknown to the catalog is stored as given; generation will
    /// reject it. Known ids are stored in canonical form.
    pub fn select_framework(&mut self, framework_id: &str) {
        let id = catalog::find_framework(framework_id)
            .map(|def| def.id.to_string())
            .unwrap_or_else(|| framework_id.trim().to_string());
        self.features = compatibility::reconcile(&self.features, &id);
        self.framework_id = Some(id);
    }

    /// Checkbox toggle. Returns whether the feature is selected afterwards.
    pub fn toggle_feature(&mut self, feature_id: &str) -> bool {
        self.features.toggle(feature_id)
    }

    /// Snapshot the current state as a generation request.
    pub fn to_request(&self, project_name: impl Into<String>) -> ScaffoldRequest {
        let request = ScaffoldRequest::new(project_name, self.platform)
            .with_selection(self.features.clone());
        match &self.framework_id {
            Some(id) => request.with_framework(id.clone()),
            None => request,
        }
    }
}
