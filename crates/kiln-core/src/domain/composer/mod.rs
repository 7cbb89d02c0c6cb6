//! Scaffold composer.
//!
//! Turns a validated request into scaffold text. The work is split in two:
//!
//! - this module decides *what* goes into the output: the header block,
//!   which wrapper kinds are active (in nesting order), and which features
//!   become marker lines (in catalog order);
//! - [`templates`] decides *how* a given framework spells it.
//!
//! Templates never look at the raw selection. They only see a
//! [`Composition`], so a template cannot get the nesting order or the
//! marker order wrong.
//!
//! # Determinism
//!
//! Output depends only on the resolved request and the [`ComposeOptions`].
//! No timestamps, no randomness, no environment lookups.

mod source;
pub mod templates;

use serde::{Deserialize, Serialize};

pub use source::Source;
pub use templates::{TemplateDef, template_for};

use crate::domain::{
    catalog::{FeatureDef, FrameworkDef},
    entities::{ResolvedRequest, ScaffoldRequest, ScaffoldResult},
    error::DomainError,
    export,
    value_objects::WrapperKind,
};

// ── Options ──────────────────────────────────────────────────────────────────

/// Branding that flows into every scaffold.
///
/// Passed explicitly; part of the deterministic input alongside the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// Shown in the first header line: `// <project> - Generated with <name>`.
    pub generator_name: String,
    pub primary_color: String,
    pub dark_color: String,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            generator_name: "Kiln".into(),
            primary_color: "#FFE900".into(),
            dark_color: "#332421".into(),
        }
    }
}

// ── Entry points ─────────────────────────────────────────────────────────────

/// Validate `request` and compose its scaffold.
///
/// Fails with the first invariant violation found by
/// [`ScaffoldRequest::resolve`]; nothing is composed in that case.
pub fn compose(
    request: &ScaffoldRequest,
    options: &ComposeOptions,
) -> Result<ScaffoldResult, DomainError> {
    let resolved = request.resolve()?;
    Ok(compose_resolved(&resolved, options))
}

/// Compose an already-validated request. Infallible.
pub fn compose_resolved(request: &ResolvedRequest, options: &ComposeOptions) -> ScaffoldResult {
    let template = template_for(request.framework().id);
    let composition = Composition::new(request, options, template);

    let mut src = Source::new();
    composition.header(&mut src);
    src.blank();
    template.render(&composition, &mut src);

    ScaffoldResult::new(
        src.finish(),
        export::suggested_filename(request.project_name(), request.framework().id),
    )
}

// ── Composition ──────────────────────────────────────────────────────────────

/// What a template is asked to render.
#[derive(Debug)]
pub struct Composition<'a> {
    request: &'a ResolvedRequest,
    options: &'a ComposeOptions,
    wrappers: Vec<WrapperKind>,
    markers: Vec<&'static FeatureDef>,
}

impl<'a> Composition<'a> {
    fn new(
        request: &'a ResolvedRequest,
        options: &'a ComposeOptions,
        template: &TemplateDef,
    ) -> Self {
        let wrappers = request
            .wrappers()
            .into_iter()
            .filter(|kind| template.supports(*kind))
            .collect();

        // A wrapper the template cannot nest still shows up, as a marker.
        let markers = request
            .features()
            .iter()
            .filter(|def| def.wrapper.is_none_or(|kind| !template.supports(kind)))
            .copied()
            .collect();

        Self {
            request,
            options,
            wrappers,
            markers,
        }
    }

    /// Trimmed project name.
    pub fn project_name(&self) -> &str {
        self.request.project_name()
    }

    pub fn framework(&self) -> &'static FrameworkDef {
        self.request.framework()
    }

    pub fn options(&self) -> &ComposeOptions {
        self.options
    }

    /// Active wrapper kinds, outermost first.
    pub fn wrappers(&self) -> &[WrapperKind] {
        &self.wrappers
    }

    pub fn wraps(&self, kind: WrapperKind) -> bool {
        self.wrappers.contains(&kind)
    }

    /// Features rendered as marker lines, in catalog order.
    pub fn markers(&self) -> &[&'static FeatureDef] {
        &self.markers
    }

    /// All selected features, in catalog order.
    pub fn features(&self) -> &[&'static FeatureDef] {
        self.request.features()
    }

    fn header(&self, src: &mut Source) {
        let features = if self.features().is_empty() {
            "None".to_string()
        } else {
            self.features()
                .iter()
                .map(|def| def.display_name)
                .collect::<Vec<_>>()
                .join(", ")
        };

        src.line(
            0,
            format!(
                "// {} - Generated with {}",
                self.project_name(),
                self.options.generator_name
            ),
        );
        src.line(0, format!("// Framework: {}", self.framework().display_name));
        src.line(0, format!("// Features: {features}"));
    }

    /// Brand colour comments, then one marker line per marker feature.
    ///
    /// Ends with a blank line so the caller can continue straight into the
    /// bootstrap code.
    pub fn preamble(&self, src: &mut Source, indent: usize) {
        src.line(
            indent,
            format!("// Primary color: {}", self.options.primary_color),
        );
        src.line(indent, format!("// Dark color: {}", self.options.dark_color));
        src.blank();

        if self.markers.is_empty() {
            return;
        }
        for def in &self.markers {
            src.line(
                indent,
                format!("// [{}] {}: {}", def.id, def.display_name, def.description),
            );
        }
        src.blank();
    }
}
