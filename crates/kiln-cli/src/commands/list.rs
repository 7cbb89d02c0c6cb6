//! Implementation of the `kiln list` command.

use std::str::FromStr;

use kiln_core::{
    application::{FeatureInfo, FrameworkInfo, GenerationService},
    domain::PlatformCategory,
    error::Context as _,
};

use crate::{
    cli::{ListCommands, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(cmd: ListCommands, output: OutputManager) -> CliResult<()> {
    let service = GenerationService::default();

    match cmd {
        ListCommands::Frameworks { platform, format } => {
            let platform = platform
                .as_deref()
                .map(PlatformCategory::from_str)
                .transpose()?;
            let frameworks = service.list_frameworks(platform);
            render_frameworks(&frameworks, format, &output)
        }
        ListCommands::Features { framework, format } => {
            let features = service.list_features(framework.as_deref())?;
            render_features(&features, format, &output)
        }
    }
}

fn render_frameworks(
    frameworks: &[FrameworkInfo],
    format: ListFormat,
    output: &OutputManager,
) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Available Frameworks:")?;
            for fw in frameworks {
                output.print(&format!(
                    "  {:<14} {:<14} {:<10} .{}",
                    fw.id,
                    fw.name,
                    fw.platforms.join(","),
                    fw.extension
                ))?;
            }
        }
        ListFormat::List => {
            for fw in frameworks {
                output.emit(&fw.id)?;
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(frameworks).context("serialising frameworks")?;
            output.emit(&json)?;
        }
        ListFormat::Csv => {
            output.emit("id,name,platforms,extension")?;
            for fw in frameworks {
                output.emit(&csv_row(&[
                    &fw.id,
                    &fw.name,
                    &fw.platforms.join(";"),
                    &fw.extension,
                ]))?;
            }
        }
    }
    Ok(())
}

fn render_features(
    features: &[FeatureInfo],
    format: ListFormat,
    output: &OutputManager,
) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Available Features:")?;
            if features.is_empty() {
                output.print("  (none for this framework)")?;
            }
            for f in features {
                let wraps = f
                    .wraps
                    .as_deref()
                    .map(|kind| format!(" [wraps {kind}]"))
                    .unwrap_or_default();
                output.print(&format!("  {:<14} {}{}", f.id, f.name, wraps))?;
                output.print(&format!("  {:<14} {}", "", f.description))?;
            }
        }
        ListFormat::List => {
            for f in features {
                output.emit(&f.id)?;
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(features).context("serialising features")?;
            output.emit(&json)?;
        }
        ListFormat::Csv => {
            output.emit("id,name,description,wraps,frameworks")?;
            for f in features {
                output.emit(&csv_row(&[
                    &f.id,
                    &f.name,
                    &f.description,
                    f.wraps.as_deref().unwrap_or(""),
                    &f.frameworks.join(";"),
                ]))?;
            }
        }
    }
    Ok(())
}

/// Join fields with commas, quoting any field that needs it.
fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| {
            if field.contains([',', '"', '\n']) {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                (*field).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_only_when_needed() {
        assert_eq!(csv_row(&["react", "React"]), "react,React");
        assert_eq!(
            csv_row(&["i18n", "Sign in, sign out", "say \"hi\""]),
            "i18n,\"Sign in, sign out\",\"say \"\"hi\"\"\""
        );
    }
}
