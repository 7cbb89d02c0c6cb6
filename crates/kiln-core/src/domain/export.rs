//! Export encoder: scaffold text to a downloadable artifact.
//!
//! The extension table lives here and nowhere else. The composer asks this
//! module for the suggested filename, and [`encode`] recomputes it from the
//! framework id rather than trusting a possibly stale result.

use serde::Serialize;

use crate::domain::entities::ScaffoldResult;

/// Used for any framework id without a specific mapping.
pub const DEFAULT_EXTENSION: &str = "js";

static EXTENSIONS: &[(&str, &str)] = &[
    ("react", "jsx"),
    ("next", "jsx"),
    ("react-native", "jsx"),
    ("vue", "vue"),
    ("angular", "ts"),
    ("svelte", "svelte"),
    ("flutter", "dart"),
    ("ionic", "tsx"),
];

/// Conventional extension for `framework_id`, without the dot.
///
/// Never fails: unknown ids get [`DEFAULT_EXTENSION`].
pub fn file_extension(framework_id: &str) -> &'static str {
    EXTENSIONS
        .iter()
        .find(|(id, _)| *id == framework_id)
        .map_or(DEFAULT_EXTENSION, |(_, ext)| *ext)
}

/// Stem used when nothing usable is left of the project name.
pub const FALLBACK_STEM: &str = "scaffold";

/// Characters that would let a project name reach outside the export
/// directory or are rejected by common filesystems.
fn is_path_hostile(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// Lower-cased project name, whitespace and path-hostile runs collapsed to
/// one hyphen, plus the framework's extension.
///
/// The result is always a single path component: leading and trailing dots
/// and hyphens are stripped, and a name with nothing left becomes
/// [`FALLBACK_STEM`].
pub fn suggested_filename(project_name: &str, framework_id: &str) -> String {
    let joined = project_name
        .split(|c: char| c.is_whitespace() || is_path_hostile(c))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    let stem = joined.trim_matches(|c: char| c == '.' || c == '-');
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    format!("{stem}.{}", file_extension(framework_id))
}

/// Bytes plus the filename to deliver them under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub payload: Vec<u8>,
    pub filename: String,
}

impl ExportArtifact {
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Encode `result` as UTF-8 under a filename derived from `framework_id`.
///
/// The project name is recovered from the result's suggested filename stem,
/// which is already lower-cased and hyphenated, so only the extension can
/// change here.
pub fn encode(result: &ScaffoldResult, framework_id: &str) -> ExportArtifact {
    let suggested = result.suggested_filename();
    let stem = suggested
        .rsplit_once('.')
        .map_or(suggested, |(stem, _)| stem);

    ExportArtifact {
        payload: result.text().as_bytes().to_vec(),
        filename: suggested_filename(stem, framework_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, framework_id: &str) -> ScaffoldResult {
        ScaffoldResult::new(
            format!("// {name}\n"),
            suggested_filename(name, framework_id),
        )
    }

    #[test]
    fn extension_table() {
        assert_eq!(file_extension("flutter"), "dart");
        assert_eq!(file_extension("react"), "jsx");
        assert_eq!(file_extension("vue"), "vue");
        assert_eq!(file_extension("electron"), "js");
        assert_eq!(file_extension("tauri"), "js");
        assert_eq!(file_extension("no-such-framework"), "js");
    }

    #[test]
    fn filename_collapses_whitespace_runs() {
        assert_eq!(suggested_filename("My App", "react"), "my-app.jsx");
        assert_eq!(
            suggested_filename("  Big   Shiny\tApp ", "flutter"),
            "big-shiny-app.dart"
        );
    }

    #[test]
    fn filename_never_leaves_the_export_directory() {
        assert_eq!(suggested_filename("../escaped", "react"), "escaped.jsx");
        assert_eq!(
            suggested_filename("..\\..\\win", "react"),
            "win.jsx"
        );
        assert_eq!(suggested_filename("/etc/passwd", "vue"), "etc-passwd.vue");
        assert_eq!(suggested_filename("..", "react"), "scaffold.jsx");
        assert_eq!(suggested_filename(" / ", "flutter"), "scaffold.dart");
    }

    #[test]
    fn filename_flattens_separators_inside_names() {
        assert_eq!(
            suggested_filename("Client/Server App", "react"),
            "client-server-app.jsx"
        );
        assert_eq!(suggested_filename("What? Now: v2", "vue"), "what-now-v2.vue");
        assert_eq!(suggested_filename("v1.2 Release", "react"), "v1.2-release.jsx");
    }

    #[test]
    fn encode_uses_utf8_payload() {
        let res = ScaffoldResult::new("// Café ☕\n".into(), "café.jsx".into());
        let artifact = encode(&res, "react");
        assert_eq!(artifact.payload, "// Café ☕\n".as_bytes());
        assert_eq!(artifact.filename, "café.jsx");
    }

    #[test]
    fn encode_recomputes_extension() {
        let stale = result("My App", "react");
        assert_eq!(encode(&stale, "flutter").filename, "my-app.dart");
        assert_eq!(encode(&stale, "react").filename, "my-app.jsx");
        assert_eq!(encode(&stale, "unmapped").filename, "my-app.js");
    }
}
