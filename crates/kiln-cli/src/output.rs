//! Output management and formatting.
//!
//! Status lines go to stdout through [`OutputManager`]; the progress bar
//! draws on stderr so `kiln new --stdout > file` stays clean.

use std::io::{self, IsTerminal};

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use kiln_core::application::progress::COMPLETE;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const BAR_TEMPLATE: &str = "{spinner:.yellow} {msg} [{bar:40.yellow/red}] {pos:>3}%";

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` wins over `output.format`; `Auto` resolves to
    /// `Human` on a TTY and `Plain` otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = args
            .output_format
            .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Command output proper (a scaffold, JSON, CSV).  Never suppressed.
    pub fn emit(&self, data: &str) -> io::Result<()> {
        if data.ends_with('\n') {
            self.term.write_str(data)
        } else {
            self.term.write_line(data)
        }
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.yellow().bold().to_string()
        };
        self.term.write_line(&line)
    }

    // ── Progress ──────────────────────────────────────────────────────────

    /// A 0–100 bar for one generation.
    ///
    /// Hidden in quiet mode, in plain output, or when `wanted` is false; the
    /// returned bar still accepts positions so callers need no branching.
    pub fn progress_bar(&self, label: &str, wanted: bool) -> ProgressBar {
        if !wanted || self.quiet || self.resolved_format == OutputFormat::Plain {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");

        let bar = ProgressBar::new(COMPLETE as u64);
        bar.set_style(style);
        bar.set_message(label.to_owned());
        bar
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Adapt a progress bar into the sink the generation service reports to.
pub fn bar_sink(bar: &ProgressBar) -> impl FnMut(f64) + Send + 'static {
    let bar = bar.clone();
    move |value: f64| bar.set_position(value.round().clamp(0.0, COMPLETE) as u64)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: Some(format),
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_print_is_ok() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn plain_disables_color() {
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn config_format_used_without_flag() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: None,
        };
        let mut config = AppConfig::default();
        config.output.format = "plain".into();
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Plain);
    }

    #[test]
    fn bar_hidden_when_not_wanted() {
        let out = make_manager(false, false, OutputFormat::Human);
        assert!(out.progress_bar("x", false).is_hidden());
        assert!(make_manager(true, false, OutputFormat::Human)
            .progress_bar("x", true)
            .is_hidden());
        assert!(make_manager(false, false, OutputFormat::Plain)
            .progress_bar("x", true)
            .is_hidden());
    }

    #[test]
    fn sink_moves_the_bar() {
        let bar = ProgressBar::hidden();
        bar.set_length(100);
        let mut sink = bar_sink(&bar);
        sink(12.6);
        assert_eq!(bar.position(), 13);
        sink(100.0);
        assert_eq!(bar.position(), 100);
    }
}
