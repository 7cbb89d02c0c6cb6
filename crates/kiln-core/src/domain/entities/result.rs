//! The composer's output value.

use serde::{Deserialize, Serialize};

/// Generated scaffold text and the filename a download should use.
///
/// Immutable once produced. Regenerating always yields a new value; nothing
/// in the crate mutates a result after [`compose`](crate::domain::composer::compose)
/// returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldResult {
    text: String,
    suggested_filename: String,
}

impl ScaffoldResult {
    pub(crate) fn new(text: String, suggested_filename: String) -> Self {
        Self {
            text,
            suggested_filename,
        }
    }

    /// The scaffold text, verbatim. This is what a copy action exposes.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggested_filename(&self) -> &str {
        &self.suggested_filename
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
