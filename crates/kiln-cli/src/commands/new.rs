//! Implementation of the `kiln new` command.
//!
//! Responsibility: translate CLI arguments (falling back to config defaults)
//! into a `ScaffoldRequest`, call the generation service, and deliver the
//! result. No composition logic lives here.

use std::{path::PathBuf, str::FromStr};

use tracing::{debug, instrument};

use kiln_adapters::LocalFilesystem;
use kiln_core::{
    application::{GenerationService, ProgressEmitter},
    domain::{PlatformCategory, ScaffoldRequest, catalog, export},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, bar_sink},
};

/// Execute the `kiln new` command.
///
/// Dispatch sequence:
/// 1. Build the request from flags and config defaults
/// 2. Early-exit if `--dry-run` (after validating)
/// 3. Generate with a progress bar
/// 4. Print the scaffold (`--stdout`) or write it to the output directory
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = build_request(&args, &config)?;
    let options = config.compose_options();

    // Validation runs here so a dry run reports the same errors a real run would.
    let resolved = request.resolve()?;
    let filename = export::suggested_filename(resolved.project_name(), resolved.framework().id);
    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    debug!(
        platform = %request.platform(),
        framework = resolved.framework().id,
        features = resolved.features().len(),
        "Request resolved"
    );

    if args.dry_run {
        output.info(&format!(
            "Dry run: would generate '{}'",
            resolved.project_name()
        ))?;
        output.info(&format!("  Platform:  {}", request.platform().label()))?;
        output.info(&format!(
            "  Framework: {}",
            resolved.framework().display_name
        ))?;
        output.info(&format!("  Features:  {}", feature_names(&resolved)))?;
        if args.stdout {
            output.info("  Output:    stdout")?;
        } else {
            output.info(&format!(
                "  Output:    {}",
                out_dir.join(&filename).display()
            ))?;
        }
        return Ok(());
    }

    let service = GenerationService::new(
        ProgressEmitter::new(config.progress_config()),
        config.settle(),
    );

    // The bar draws on stderr, so it never mixes into --stdout output.
    let bar = output.progress_bar(
        &format!("Generating {filename}"),
        !args.no_progress,
    );
    let generated = service.generate(&request, &options, bar_sink(&bar));
    bar.finish_and_clear();
    let result = generated?;

    if args.stdout {
        output.emit(result.text())?;
        return Ok(());
    }

    let path = service.export(
        &result,
        resolved.framework().id,
        &LocalFilesystem::new(),
        &out_dir,
        args.force,
    )?;

    output.success(&format!("Scaffold written to {}", path.display()))?;
    if !global.quiet && resolved.features().is_empty() {
        output.print("")?;
        output.print("Add features with -F, e.g.:")?;
        output.print(&format!(
            "  kiln new \"{}\" -f {} -F theme --force",
            resolved.project_name(),
            resolved.framework().id
        ))?;
    }

    Ok(())
}

// ── Request construction ──────────────────────────────────────────────────────

/// Flags win; anything omitted comes from `[defaults]`.
///
/// Default features are only used when no `-F` flag was given at all, so a
/// single `-F` replaces the configured list rather than extending it.
fn build_request(args: &NewArgs, config: &AppConfig) -> CliResult<ScaffoldRequest> {
    let platform_text = args
        .platform
        .as_deref()
        .unwrap_or(config.defaults.platform.as_str());
    let platform = PlatformCategory::from_str(platform_text)?;

    let framework = args
        .framework
        .as_deref()
        .or(config.defaults.framework.as_deref());

    let features = if args.features.is_empty() {
        &config.defaults.features
    } else {
        &args.features
    };

    let mut request = ScaffoldRequest::new(args.name.as_str(), platform);
    if let Some(id) = framework {
        request = request.with_framework(canonical_framework_id(id));
    }
    Ok(request.with_features(features.iter().map(|id| canonical_feature_id(id))))
}

/// Map an alias (`nextjs`, `rn`) onto its catalog id.  Unknown ids pass
/// through untouched for the core to reject.
fn canonical_framework_id(id: &str) -> String {
    catalog::find_framework(id).map_or_else(|| id.to_string(), |def| def.id.to_string())
}

fn canonical_feature_id(id: &str) -> String {
    catalog::find_feature(id).map_or_else(|| id.to_string(), |def| def.id.to_string())
}

fn feature_names(resolved: &kiln_core::domain::ResolvedRequest) -> String {
    if resolved.features().is_empty() {
        return "none".into();
    }
    resolved
        .features()
        .iter()
        .map(|f| f.display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
