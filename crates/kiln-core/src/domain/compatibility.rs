//! Compatibility filter: which catalog entries are selectable right now.
//!
//! Both filters are pure and total. They never reorder: the result is the
//! catalog sequence with non-matching entries removed.

use crate::domain::{
    catalog::{self, FeatureDef, FrameworkDef},
    entities::FeatureSelection,
    value_objects::PlatformCategory,
};

/// Frameworks that can target `platform`, in catalog order.
pub fn frameworks_for(platform: PlatformCategory) -> Vec<&'static FrameworkDef> {
    catalog::list_frameworks()
        .iter()
        .filter(|def| def.supports(platform))
        .collect()
}

/// Features selectable for `framework_id`, in catalog order.
///
/// With no framework chosen yet every feature is offered.
pub fn features_for(framework_id: Option<&str>) -> Vec<&'static FeatureDef> {
    catalog::list_features()
        .iter()
        .filter(|def| framework_id.is_none_or(|id| def.is_compatible_with(id)))
        .collect()
}

/// Drop every selected feature that `framework_id` cannot host.
///
/// Survivors keep their relative toggle order. Ids unknown to the catalog
/// are dropped as well, since no framework can host them.
pub fn reconcile(selection: &FeatureSelection, framework_id: &str) -> FeatureSelection {
    selection
        .iter()
        .filter(|id| {
            catalog::find_feature(id).is_some_and(|def| def.is_compatible_with(framework_id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frameworks_for_each_platform_match_the_catalog_exactly() {
        for platform in PlatformCategory::ALL {
            let filtered = frameworks_for(platform);
            assert!(filtered.iter().all(|f| f.supports(platform)));

            let expected: Vec<_> = catalog::list_frameworks()
                .iter()
                .filter(|f| f.supported_platforms.contains(&platform))
                .collect();
            assert_eq!(filtered, expected, "{platform}");
        }
    }

    #[test]
    fn website_frameworks_in_catalog_order() {
        let ids: Vec<_> = frameworks_for(PlatformCategory::Website)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, ["react", "vue", "angular", "svelte", "next"]);
    }

    #[test]
    fn features_for_none_is_the_whole_catalog() {
        let all: Vec<_> = catalog::list_features().iter().collect();
        assert_eq!(features_for(None), all);
    }

    #[test]
    fn features_for_every_framework_are_compatible() {
        for fw in catalog::list_frameworks() {
            for feature in features_for(Some(fw.id)) {
                assert!(feature.compatible_frameworks.contains(&fw.id));
            }
        }
    }

    #[test]
    fn svelte_offers_no_features() {
        assert!(features_for(Some("svelte")).is_empty());
    }

    #[test]
    fn unknown_framework_offers_nothing() {
        assert!(features_for(Some("cobol")).is_empty());
    }

    #[test]
    fn reconcile_drops_incompatible_and_keeps_order() {
        let selection: FeatureSelection = ["pwa", "auth", "analytics", "theme"].into_iter().collect();

        let for_electron = reconcile(&selection, "electron");
        assert_eq!(for_electron.as_slice(), ["auth", "theme"]);

        let for_react = reconcile(&selection, "react");
        assert_eq!(for_react, selection);
    }
}
