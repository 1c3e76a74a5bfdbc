//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hubgen",
    bin_name = "hubgen",
    version  = env!("CARGO_PKG_VERSION"),
    about    = "Incremental feature scaffolding with hub file merging",
    long_about = "hubgen renders per-feature files from a page/entity model and \
                  registers each entity in the project's hub files exactly once, \
                  however often it is re-run.",
    after_help = "EXAMPLES:\n\
        \x20 hubgen init --root lib --project my_app\n\
        \x20 hubgen generate todos.json --root lib --project my_app\n\
        \x20 hubgen templates\n\
        \x20 hubgen completions bash > /usr/share/bash-completion/completions/hubgen",
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
    /// Generate a page from a model file.
    #[command(
        visible_alias = "g",
        about = "Generate a page and register its entity in the hub files",
        after_help = "EXAMPLES:\n\
            \x20 hubgen generate todos.json\n\
            \x20 hubgen generate todos.json --root lib --project my_app --yes\n\
            \x20 hubgen generate about.json --no-overwrite --output-format json"
    )]
    Generate(GenerateArgs),

    /// Write the project skeleton (hub files and bootstrap files).
    #[command(
        about = "Initialise a project skeleton",
        after_help = "EXAMPLES:\n\
            \x20 hubgen init\n\
            \x20 hubgen init --root lib --project my_app"
    )]
    Init(InitArgs),

    /// List the loaded template bundle.
    #[command(
        visible_alias = "ls",
        about = "List loaded templates",
        after_help = "EXAMPLES:\n\
            \x20 hubgen templates\n\
            \x20 hubgen templates --templates ./my-bundle --format json"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hubgen completions bash > ~/.local/share/bash-completion/completions/hubgen\n\
            \x20 hubgen completions zsh  > ~/.zfunc/_hubgen\n\
            \x20 hubgen completions fish > ~/.config/fish/completions/hubgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the hubgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hubgen config get project.name\n\
            \x20 hubgen config set generation.overwrite always\n\
            \x20 hubgen config list"
    )]
    Config(ConfigCommands),
}

// ── shared project options ────────────────────────────────────────────────────

/// Where to generate and with which bundle. Unset values fall back to config.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Project source root that generated paths are relative to.
    #[arg(short = 'r', long = "root", value_name = "DIR", help = "Project source root")]
    pub root: Option<PathBuf>,

    /// Package name used in generated imports.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "NAME",
        help = "Package name used in generated imports"
    )]
    pub project: Option<String>,

    /// Template bundle directory overriding the built-in templates.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template bundle directory"
    )]
    pub templates: Option<PathBuf>,
}

/// Overwrite policy flags shared by `generate` and `init`.
#[derive(Debug, Clone, Copy, Args)]
pub struct OverwriteArgs {
    /// Overwrite existing leaf files without asking.
    #[arg(
        short = 'y',
        long = "yes",
        conflicts_with = "no_overwrite",
        help = "Overwrite existing files without asking"
    )]
    pub yes: bool,

    /// Never overwrite existing leaf files.
    #[arg(long = "no-overwrite", help = "Keep every existing file")]
    pub no_overwrite: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `hubgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// JSON model file: `{ "page": {...}, "entities": [...] }`.
    #[arg(value_name = "MODEL", help = "JSON model file")]
    pub model: PathBuf,

    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,

    /// Initialise the project skeleton first when it is missing.
    #[arg(long = "init", help = "Initialise the project first if needed")]
    pub init: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `hubgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `hubgen templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Template bundle directory overriding the built-in templates.
    #[arg(short = 't', long = "templates", value_name = "DIR", help = "Template bundle directory")]
    pub templates: Option<PathBuf>,

    /// Check a model file's page against the bundle.
    #[arg(long = "check", value_name = "MODEL", help = "Report templates MODEL would need but the bundle lacks")]
    pub check: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table", help = "Output format")]
    pub format: ListFormat,
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hubgen completions`.
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

/// Subcommands for `hubgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.name`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Write `.hubgen.toml` in the current directory instead.
        #[arg(long = "local", help = "Create local configuration in current directory")]
        local: bool,

        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "hubgen", "generate", "todos.json", "--root", "lib", "--project", "app", "--yes",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.model, PathBuf::from("todos.json"));
        assert_eq!(args.project.root, Some(PathBuf::from("lib")));
        assert!(args.overwrite.yes);
        assert!(!args.init);
    }

    #[test]
    fn generate_alias() {
        let cli = Cli::parse_from(["hubgen", "g", "m.json"]);
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn yes_and_no_overwrite_conflict() {
        let result =
            Cli::try_parse_from(["hubgen", "generate", "m.json", "--yes", "--no-overwrite"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["hubgen", "--quiet", "--verbose", "templates"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_init_flags() {
        let cli = Cli::parse_from(["hubgen", "config", "init", "--local"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { local: true, force: false })
        ));
    }
}
