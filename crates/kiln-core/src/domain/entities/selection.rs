//! Ordered, duplicate-free feature selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::catalog;

/// The features a user has switched on, in the order they were toggled.
///
/// Toggle order is kept for display purposes only. The composer never
/// relies on it: headers use catalog order and wrappers use nesting order.
///
/// Ids that name a catalog feature (directly or through an alias) are stored
/// in their canonical form, so `database` and `db` are the same entry.
/// Unknown ids are kept verbatim so validation can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSelection(Vec<String>);

impl FeatureSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent; returns `false` when it was already selected.
    pub fn insert(&mut self, id: impl AsRef<str>) -> bool {
        let id = canonical(id.as_ref());
        if self.0.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove `id`; returns `false` when it was not selected.
    pub fn remove(&mut self, id: impl AsRef<str>) -> bool {
        let id = canonical(id.as_ref());
        let before = self.0.len();
        self.0.retain(|existing| *existing != id);
        self.0.len() != before
    }

    /// Checkbox semantics: select when absent, deselect when present.
    ///
    /// Returns whether the feature is selected afterwards.
    pub fn toggle(&mut self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        if self.remove(id) {
            false
        } else {
            self.insert(id)
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(&canonical(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FeatureSelection {
    /// Later duplicates of an id are ignored.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

impl<S: AsRef<str>> Extend<S> for FeatureSelection {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl From<Vec<String>> for FeatureSelection {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<FeatureSelection> for Vec<String> {
    fn from(selection: FeatureSelection) -> Self {
        selection.0
    }
}

impl fmt::Display for FeatureSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

fn canonical(id: &str) -> String {
    catalog::find_feature(id)
        .map(|def| def.id.to_string())
        .unwrap_or_else(|| id.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = FeatureSelection::new();
        assert!(selection.toggle("auth"));
        assert!(selection.contains("auth"));
        assert!(!selection.toggle("auth"));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggling_never_duplicates() {
        let mut selection = FeatureSelection::new();
        selection.toggle("db");
        selection.toggle("theme");
        selection.toggle("db");
        selection.toggle("db");
        assert_eq!(selection.as_slice(), ["theme", "db"]);
    }

    #[test]
    fn aliases_collapse_to_canonical_ids() {
        let selection: FeatureSelection = ["database", "db", "Theming"].into_iter().collect();
        assert_eq!(selection.as_slice(), ["db", "theme"]);
        assert!(selection.contains("database"));
    }

    #[test]
    fn unknown_ids_are_kept_verbatim() {
        let selection: FeatureSelection = ["blockchain"].into_iter().collect();
        assert_eq!(selection.as_slice(), ["blockchain"]);
    }

    #[test]
    fn deserializing_drops_duplicates_and_aliases() {
        let selection: FeatureSelection =
            serde_json::from_str(r#"["db", "database", "theme", "db"]"#).unwrap();
        assert_eq!(selection.as_slice(), ["db", "theme"]);
        assert_eq!(serde_json::to_string(&selection).unwrap(), r#"["db","theme"]"#);
    }

    #[test]
    fn remove_reports_absence() {
        let mut selection = FeatureSelection::new();
        assert!(!selection.remove("api"));
    }
}
