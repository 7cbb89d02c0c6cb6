//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f525} Deterministic scaffold generation",
    long_about = "Kiln composes a single starter source file for a chosen platform, \
                  framework and set of features.",
    after_help = "EXAMPLES:\n\
        \x20 kiln new \"My App\" --platform website --framework react -F theme -F auth\n\
        \x20 kiln new shop -p mobile -f flutter -F db,payment --stdout\n\
        \x20 kiln list frameworks --platform desktop\n\
        \x20 kiln completions bash > /usr/share/bash-completion/completions/kiln",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a scaffold file.
    #[command(
        visible_alias = "n",
        about = "Generate a scaffold",
        after_help = "EXAMPLES:\n\
            \x20 kiln new \"My App\" -f react -F theme -F auth        # writes ./my-app.jsx\n\
            \x20 kiln new desk -p desktop -f tauri -F db -o out    # writes out/desk.js\n\
            \x20 kiln new demo -f vue --stdout                    # prints the scaffold"
    )]
    New(NewArgs),

    /// List the catalog.
    #[command(
        visible_alias = "ls",
        about = "List frameworks or features",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiln list frameworks\n\
            \x20 kiln list frameworks --platform mobile --format json\n\
            \x20 kiln list features --framework electron"
    )]
    List(ListCommands),

    /// Initialise a Kiln configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kiln init           # user config directory\n\
            \x20 kiln init --local   # .kiln.toml in the current directory\n\
            \x20 kiln init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiln completions bash > ~/.local/share/bash-completion/completions/kiln\n\
            \x20 kiln completions zsh  > ~/.zfunc/_kiln\n\
            \x20 kiln completions fish > ~/.config/fish/completions/kiln.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Kiln configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiln config get defaults.platform\n\
            \x20 kiln config list\n\
            \x20 kiln config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `kiln new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name.  Free text; whitespace becomes hyphens in the filename.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Target platform; falls back to `defaults.platform`.
    #[arg(
        short = 'p',
        long = "platform",
        value_name = "PLATFORM",
        help = "Target platform (website, mobile, desktop)"
    )]
    pub platform: Option<String>,

    /// Framework id; falls back to `defaults.framework`.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Framework to use (e.g. react, flutter, tauri)"
    )]
    pub framework: Option<String>,

    /// Feature ids, in toggle order.  Repeat the flag or separate with commas.
    #[arg(
        short = 'F',
        long = "feature",
        value_name = "FEATURE",
        value_delimiter = ',',
        action = clap::ArgAction::Append,
        help = "Feature to enable (repeatable)"
    )]
    pub features: Vec<String>,

    /// Directory the scaffold file is written to.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        conflicts_with = "stdout",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Print the scaffold instead of writing a file.
    #[arg(long = "stdout", help = "Print the scaffold to stdout")]
    pub stdout: bool,

    /// Overwrite an existing file of the same name.
    #[arg(long = "force", help = "Overwrite an existing file")]
    pub force: bool,

    /// Validate and describe the scaffold without generating it.
    #[arg(long = "dry-run", help = "Show what would be generated without generating")]
    pub dry_run: bool,

    /// Skip the progress bar.
    #[arg(long = "no-progress", help = "Do not render a progress bar")]
    pub no_progress: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Subcommands for `kiln list`.
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// Frameworks, optionally only those supporting a platform.
    Frameworks {
        /// Filter by platform.
        #[arg(short = 'p', long = "platform", value_name = "PLATFORM")]
        platform: Option<String>,

        /// Output format.
        #[arg(long = "format", value_enum, default_value = "table")]
        format: ListFormat,
    },
    /// Features, optionally only those offered by a framework.
    Features {
        /// Filter by framework.
        #[arg(short = 'f', long = "framework", value_name = "FRAMEWORK")]
        framework: Option<String>,

        /// Output format.
        #[arg(long = "format", value_enum, default_value = "table")]
        format: ListFormat,
    },
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.kiln.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kiln completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kiln config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `branding.generator_name`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_color_flag_parses_without_value() {
        let cli = Cli::parse_from(["kiln", "--no-color", "list", "frameworks"]);
        assert!(cli.global.no_color);
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from([
            "kiln",
            "new",
            "My App",
            "--platform",
            "website",
            "--framework",
            "react",
            "-F",
            "theme",
            "-F",
            "auth",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "My App");
        assert_eq!(args.platform.as_deref(), Some("website"));
        assert_eq!(args.framework.as_deref(), Some("react"));
        assert_eq!(args.features, ["theme", "auth"]);
    }

    #[test]
    fn features_accept_comma_lists() {
        let cli = Cli::parse_from(["kiln", "new", "x", "-F", "db,payment", "-F", "api"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.features, ["db", "payment", "api"]);
    }

    #[test]
    fn stdout_conflicts_with_output_dir() {
        let result = Cli::try_parse_from(["kiln", "new", "x", "--stdout", "-o", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn list_subcommands_parse() {
        let cli = Cli::parse_from(["kiln", "ls", "frameworks", "-p", "mobile", "--format", "csv"]);
        assert!(matches!(
            cli.command,
            Commands::List(ListCommands::Frameworks {
                format: ListFormat::Csv,
                ..
            })
        ));

        let cli = Cli::parse_from(["kiln", "list", "features", "--framework", "vue"]);
        let Commands::List(ListCommands::Features { framework, format }) = cli.command else {
            panic!("expected list features");
        };
        assert_eq!(framework.as_deref(), Some("vue"));
        assert_eq!(format, ListFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kiln", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }
}
