//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use hubgen_core::{
    application::TemplateInfo,
    domain::{FileOutcome, GenerationReport, RunState},
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

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
    /// An explicit `--output-format` wins over `output.format`; `human`
    /// falls back to plain text when stdout is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => match config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "plain" => OutputFormat::Plain,
                _ => OutputFormat::Auto,
            },
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable payload; never suppressed.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        self.term.write_line(payload)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Print a generation report as a table, or as JSON.
    pub fn report(&self, report: &GenerationReport) -> io::Result<()> {
        if self.is_json() {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            return self.data(&json);
        }
        if self.quiet {
            return Ok(());
        }
        self.term
            .write_str(&render_report(report, !self.no_color))
    }

    /// Print the loaded templates.
    pub fn templates(&self, templates: &[TemplateInfo]) -> io::Result<()> {
        if self.is_json() {
            let rows: Vec<serde_json::Value> = templates
                .iter()
                .map(|t| serde_json::json!({ "name": t.name, "used": t.used }))
                .collect();
            let json = serde_json::to_string_pretty(&rows).map_err(io::Error::other)?;
            return self.data(&json);
        }
        for t in templates {
            let marker = if t.used { " " } else { "*" };
            self.print(&format!("  {marker} {}", t.name))?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

/// Human-readable report: one line per file, notes underneath, then totals.
pub fn render_report(report: &GenerationReport, colored: bool) -> String {
    let width = report
        .entries
        .iter()
        .map(|e| e.path.display().to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in &report.entries {
        let label = entry.outcome.label();
        let label = if colored {
            match entry.outcome {
                FileOutcome::Written => label.green().to_string(),
                FileOutcome::Skipped => label.yellow().to_string(),
                FileOutcome::Unchanged => label.dimmed().to_string(),
                FileOutcome::Failed { .. } => label.red().bold().to_string(),
            }
        } else {
            label.to_owned()
        };
        // Pad on the raw label so ANSI codes don't skew alignment.
        let pad = " ".repeat(9 - entry.outcome.label().len());
        out.push_str(&format!(
            "  {label}{pad} {:<width$}  ({})\n",
            entry.path.display().to_string(),
            entry.role,
        ));
        if let FileOutcome::Failed { error } = &entry.outcome {
            out.push_str(&format!("      \u{21b3} {error}\n"));
        }
        for note in &entry.notes {
            out.push_str(&format!("      \u{21b3} {note}\n"));
        }
    }

    out.push_str(&format!(
        "\n{} written, {} skipped, {} unchanged, {} failed\n",
        report.count("written"),
        report.count("skipped"),
        report.count("unchanged"),
        report.count("failed"),
    ));

    if let RunState::Failed { phase, reason } = &report.state {
        let line = format!("Run stopped while {phase}: {reason}");
        if colored {
            out.push_str(&format!("{}\n", line.red().bold()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }

    out
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use hubgen_core::domain::{FileRole, ReportEntry, RunPhase};

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            log_dir: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn sample_report() -> GenerationReport {
        let mut report = GenerationReport::start("/app/lib");
        report.enter(RunPhase::EmittingLeafFiles);
        report.record(ReportEntry::new(
            "data/model/todo_data.dart",
            FileRole::Leaf,
            FileOutcome::Written,
        ));
        report.record(
            ReportEntry::new("state/store.dart", FileRole::Hub, FileOutcome::Unchanged)
                .with_notes(vec!["anchor 'middleware: []' not found".into()]),
        );
        report.record(ReportEntry::new(
            "features/todos/todos_view.dart",
            FileRole::Feature,
            FileOutcome::Failed {
                error: "template 'view.dart.hbs' is missing".into(),
            },
        ));
        report.finish()
    }

    #[test]
    fn plain_report_lists_every_entry_and_totals() {
        let text = render_report(&sample_report(), false);
        assert!(text.contains("written   data/model/todo_data.dart"));
        assert!(text.contains("unchanged state/store.dart"));
        assert!(text.contains("anchor 'middleware: []' not found"));
        assert!(text.contains("view.dart.hbs"));
        assert!(text.contains("1 written, 0 skipped, 1 unchanged, 1 failed"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn failed_run_is_called_out() {
        let mut report = GenerationReport::start("/app/lib");
        report.enter(RunPhase::BuildingContext);
        let report = report.fail("not initialised");
        let text = render_report(&report, false);
        assert!(text.contains("Run stopped while building context: not initialised"));
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert!(!out.supports_color());
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn config_format_used_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            log_dir: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }
}
