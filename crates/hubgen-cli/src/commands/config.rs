//! `hubgen config`: read and write configuration values.

use std::path::{Path, PathBuf};

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` flag; `config` is the effective,
/// already-merged configuration.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            output.data(&value)?;
        }

        ConfigCommands::Set { key, value } => {
            // Only the file's own values are persisted, not env overrides.
            let path = AppConfig::active_path(config_file);
            let updated = read_file(&path)?.with_value(&key, &value)?;
            write_file(&path, &updated)?;
            output.success(&format!("{key} = {value} ({})", path.display()))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.data(&config.to_toml()?)?;
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::active_path(config_file).display().to_string())?;
        }

        ConfigCommands::Init { local, force } => {
            let path = if local {
                PathBuf::from(LOCAL_CONFIG_FILE)
            } else {
                AppConfig::config_path()
            };

            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {}  (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }

            write_file(&path, &AppConfig::default())?;
            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn read_file(path: &Path) -> CliResult<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_cli_context(|| format!("Failed to read config '{}'", path.display()))?;
    toml::from_str(&raw).map_err(|e| CliError::ConfigError {
        message: format!("Failed to parse '{}'", path.display()),
        source: Some(Box::new(e)),
    })
}

fn write_file(path: &Path, config: &AppConfig) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, config.to_toml()?)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverwritePolicy;

    #[test]
    fn set_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let updated = read_file(&path)
            .unwrap()
            .with_value("generation.overwrite", "never")
            .unwrap();
        write_file(&path, &updated).unwrap();

        let reread = read_file(&path).unwrap();
        assert_eq!(reread.generation.overwrite, OverwritePolicy::Never);
        assert_eq!(reread.project.extension, "dart");
    }

    #[test]
    fn unparsable_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[project\nroot = ").unwrap();
        assert!(matches!(
            read_file(&path),
            Err(CliError::ConfigError { .. })
        ));
    }
}
