//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the pieces it needs
//! ([`ComposeOptions`], [`ProgressConfig`], the settle delay).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `KILN_`-prefixed environment variables, `__` between sections
//!    (e.g. `KILN_PROGRESS__SETTLE_MS=0`)
//! 3. The file passed with `--config` (must exist)
//! 4. `.kiln.toml` in the current directory
//! 5. The user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults (always present)

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use kiln_core::{application::ProgressConfig, domain::ComposeOptions};

/// File name used by `kiln init --local` and picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".kiln.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when `kiln new` omits a flag.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Generator name and colours written into every scaffold.
    pub branding: Branding,
    /// Progress bar pacing.
    pub progress: ProgressSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub platform: String,
    pub framework: Option<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human` or `plain`.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub generator_name: String,
    pub primary_color: String,
    pub dark_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    pub tick_ms: u64,
    /// Pause between composing and reporting 100%.
    pub settle_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
            branding: Branding::default(),
            progress: ProgressSettings::default(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            platform: "website".into(),
            framework: None,
            features: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        let options = ComposeOptions::default();
        Self {
            generator_name: options.generator_name,
            primary_color: options.primary_color,
            dark_color: options.dark_color,
        }
    }
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            settle_ms: 2500,
        }
    }
}

impl AppConfig {
    /// Load configuration by layering every source over the defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; unlike the
    /// implicit locations it must exist.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(Self::config_path()).required(false))
            .add_source(File::from(PathBuf::from(LOCAL_CONFIG_FILE)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("KILN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.features"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kiln.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kiln", "kiln")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Branding as the composer consumes it.
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            generator_name: self.branding.generator_name.clone(),
            primary_color: self.branding.primary_color.clone(),
            dark_color: self.branding.dark_color.clone(),
        }
    }

    /// Emitter pacing; step sizes keep their defaults.
    pub fn progress_config(&self) -> ProgressConfig {
        ProgressConfig {
            tick_interval: Duration::from_millis(self.progress.tick_ms.max(1)),
            ..ProgressConfig::default()
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.progress.settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_compose_options() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.compose_options(), ComposeOptions::default());
        assert_eq!(cfg.defaults.platform, "website");
        assert!(cfg.defaults.framework.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn progress_settings_convert_to_durations() {
        let mut cfg = AppConfig::default();
        cfg.progress.tick_ms = 0;
        cfg.progress.settle_ms = 40;
        assert_eq!(cfg.progress_config().tick_interval, Duration::from_millis(1));
        assert_eq!(cfg.settle(), Duration::from_millis(40));
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiln.toml");
        std::fs::write(
            &path,
            "[defaults]\nframework = \"vue\"\n\n[branding]\ngenerator_name = \"Forge\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.framework.as_deref(), Some("vue"));
        assert_eq!(cfg.branding.generator_name, "Forge");
        assert_eq!(cfg.branding.primary_color, "#FFE900");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
