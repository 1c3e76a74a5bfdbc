//! Command handlers.
//!
//! Each handler translates parsed arguments into core calls and displays the
//! results. Shared wiring (project resolution, adapters, overwrite policy)
//! lives here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use hubgen_adapters::{FixedAnswer, HandlebarsRenderer, LocalFileStore};
use hubgen_core::{
    application::{Project, ScaffoldService, ports::OverwritePrompt},
    domain::{GenerationReport, ModelFile, ProjectLayout, RunState},
    error::HubgenError,
};

use crate::{
    cli::{OverwriteArgs, ProjectArgs},
    config::{AppConfig, OverwritePolicy},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod templates;

/// Project root and package name: flags first, then config, then the name
/// of the directory holding the root.
pub fn resolve_project(args: &ProjectArgs, config: &AppConfig) -> CliResult<Project> {
    let root = args
        .root
        .clone()
        .unwrap_or_else(|| config.project.root.clone());

    let name = match args.project.clone().or_else(|| config.project.name.clone()) {
        Some(name) => name,
        None => package_name_for(&root)?,
    };

    debug!(root = %root.display(), project = %name, "project resolved");
    Ok(Project::new(root, name))
}

fn package_name_for(root: &Path) -> CliResult<String> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .with_cli_context(|| "reading the current directory")?
            .join(root)
    };
    let absolute = absolute.canonicalize().unwrap_or(absolute);

    absolute
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .map(|n| n.replace('-', "_").to_lowercase())
        .ok_or_else(|| CliError::UnknownProjectName {
            root: root.to_path_buf(),
        })
}

/// Template directory: flag first, then config.
pub fn templates_dir(flag: Option<&PathBuf>, config: &AppConfig) -> Option<PathBuf> {
    flag.cloned().or_else(|| config.templates.dir.clone())
}

pub fn load_renderer(dir: Option<&Path>) -> CliResult<Arc<HandlebarsRenderer>> {
    Ok(Arc::new(HandlebarsRenderer::discover(dir)?))
}

/// Warn about templates a run needs but the bundle lacks. The matching
/// files fail on their own; the run still goes ahead.
pub fn warn_missing_templates(missing: &[String], output: &OutputManager) -> CliResult<()> {
    if missing.is_empty() {
        return Ok(());
    }
    warn!(missing = ?missing, "bundle lacks templates");
    output.warning(&format!(
        "Bundle lacks {}; the matching files will fail",
        missing.join(", ")
    ))?;
    Ok(())
}

/// Assemble a service writing to the local filesystem.
pub fn build_service(
    renderer: Arc<HandlebarsRenderer>,
    overwrite: OverwriteArgs,
    config: &AppConfig,
    quiet: bool,
) -> CliResult<ScaffoldService> {
    let layout =
        ProjectLayout::new(config.project.extension.as_str()).map_err(HubgenError::from)?;
    let prompt = overwrite_prompt(resolve_policy(overwrite, config), quiet);

    Ok(
        ScaffoldService::new(renderer, Box::new(LocalFileStore::new()), prompt)
            .with_layout(layout),
    )
}

pub fn resolve_policy(overwrite: OverwriteArgs, config: &AppConfig) -> OverwritePolicy {
    if overwrite.yes {
        OverwritePolicy::Always
    } else if overwrite.no_overwrite {
        OverwritePolicy::Never
    } else {
        config.generation.overwrite
    }
}

fn overwrite_prompt(policy: OverwritePolicy, quiet: bool) -> Box<dyn OverwritePrompt> {
    match policy {
        OverwritePolicy::Always => Box::new(FixedAnswer::always()),
        OverwritePolicy::Never => Box::new(FixedAnswer::never()),
        OverwritePolicy::Prompt if !quiet && crate::prompt::is_interactive() => {
            crate::prompt::overwrite_prompt()
        }
        OverwritePolicy::Prompt => {
            debug!("no terminal to ask on; existing files are kept");
            Box::new(FixedAnswer::never())
        }
    }
}

pub fn read_model(path: &Path) -> CliResult<ModelFile> {
    let raw = std::fs::read_to_string(path)
        .with_cli_context(|| format!("reading model file '{}'", path.display()))?;
    serde_json::from_str(&raw).map_err(|source| CliError::InvalidModel {
        path: path.to_path_buf(),
        source,
    })
}

/// Map a finished report to the command result.
pub fn report_result(report: &GenerationReport) -> CliResult<()> {
    if let RunState::Failed { reason, .. } = &report.state {
        return Err(CliError::RunStopped {
            reason: reason.clone(),
        });
    }
    match report.count("failed") {
        0 => Ok(()),
        failed => Err(CliError::FilesFailed { failed }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubgen_core::domain::{FileOutcome, FileRole, ReportEntry};

    fn project_args(root: Option<&str>, project: Option<&str>) -> ProjectArgs {
        ProjectArgs {
            root: root.map(PathBuf::from),
            project: project.map(str::to_owned),
            templates: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.project.name = Some("from_config".into());

        let project = resolve_project(&project_args(Some("src"), Some("shop")), &config).unwrap();
        assert_eq!(project.root, PathBuf::from("src"));
        assert_eq!(project.name, "shop");

        let project = resolve_project(&project_args(None, None), &config).unwrap();
        assert_eq!(project.root, PathBuf::from("lib"));
        assert_eq!(project.name, "from_config");
    }

    #[test]
    fn package_name_comes_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("my-app");
        std::fs::create_dir_all(app.join("lib")).unwrap();

        let name = package_name_for(&app.join("lib")).unwrap();
        assert_eq!(name, "my_app");
    }

    #[test]
    fn policy_flags_beat_config() {
        let mut config = AppConfig::default();
        config.generation.overwrite = OverwritePolicy::Never;

        let yes = OverwriteArgs {
            yes: true,
            no_overwrite: false,
        };
        let unset = OverwriteArgs {
            yes: false,
            no_overwrite: false,
        };
        assert_eq!(resolve_policy(yes, &config), OverwritePolicy::Always);
        assert_eq!(resolve_policy(unset, &config), OverwritePolicy::Never);
    }

    #[test]
    fn failed_entries_fail_the_command() {
        let mut report = GenerationReport::start("/app/lib");
        report.record(ReportEntry::new(
            "a.dart",
            FileRole::Leaf,
            FileOutcome::Failed {
                error: "boom".into(),
            },
        ));
        let report = report.finish();
        assert!(matches!(
            report_result(&report),
            Err(CliError::FilesFailed { failed: 1 })
        ));
    }

    #[test]
    fn stopped_run_fails_the_command() {
        let report = GenerationReport::start("/app/lib").fail("lock poisoned");
        assert!(matches!(
            report_result(&report),
            Err(CliError::RunStopped { .. })
        ));
    }
}
