//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HUBGEN__<SECTION>__<KEY>`, e.g.
//!    `HUBGEN__PROJECT__NAME=my_app`
//! 3. Config file: `--config`, else `./.hubgen.toml`, else the per-user file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".hubgen.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where generated files go.
    pub project: ProjectConfig,
    /// Template bundle settings.
    pub templates: TemplateConfig,
    /// Generation behaviour.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Source root generated paths are relative to.
    pub root: PathBuf,
    /// Package name for imports. Defaults to the directory holding `root`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Extension of generated sources.
    pub extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Bundle directory overriding the built-in templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// What to do when a leaf file already exists.
    pub overwrite: OverwritePolicy,
}

/// Answer to "overwrite this existing file?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask on a terminal; keep the file otherwise.
    #[default]
    Prompt,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `human`, `plain` or `json`.
    pub format: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("lib"),
            name: None,
            extension: "dart".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            templates: TemplateConfig::default(),
            generation: GenerationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `HUBGEN__*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = Self::active_path(config_file.map(PathBuf::as_path));

        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                config::Environment::with_prefix("HUBGEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hubgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hubgen", "hubgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `load` reads and `config set` writes.
    pub fn active_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            local
        } else {
            Self::config_path()
        }
    }

    /// Value of a dotted key, e.g. `project.root`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let table = self.to_table()?;
        let mut current = &toml::Value::Table(table);
        for part in key.split('.') {
            current = current
                .get(part)
                .ok_or_else(|| unknown_key(key))?;
        }
        Ok(match current {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Copy of `self` with the dotted `key` set to `value`.
    ///
    /// The result is re-validated, so `generation.overwrite = maybe` is
    /// rejected.
    pub fn with_value(&self, key: &str, value: &str) -> CliResult<Self> {
        let mut table = self.to_table()?;

        let parts: Vec<&str> = key.split('.').collect();
        let Some((leaf, sections)) = parts.split_last() else {
            return Err(unknown_key(key));
        };

        let mut current = &mut table;
        for section in sections {
            current = match current.get_mut(*section) {
                Some(toml::Value::Table(inner)) => inner,
                _ => return Err(unknown_key(key)),
            };
        }
        let known = current.contains_key(*leaf) || is_optional_key(key);
        if !known {
            return Err(unknown_key(key));
        }
        current.insert((*leaf).to_owned(), parse_value(value));

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| CliError::ConfigError {
                message: format!("Invalid value '{value}' for '{key}'"),
                source: Some(Box::new(e)),
            })
    }

    /// Serialise as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn to_table(&self) -> CliResult<toml::Table> {
        toml::Table::try_from(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Keys skipped during serialisation while unset.
fn is_optional_key(key: &str) -> bool {
    matches!(key, "project.name" | "templates.dir")
}

fn parse_value(raw: &str) -> toml::Value {
    match raw {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => toml::Value::String(raw.to_owned()),
    }
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_dart_under_lib() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.project.root, PathBuf::from("lib"));
        assert_eq!(cfg.project.extension, "dart");
        assert_eq!(cfg.generation.overwrite, OverwritePolicy::Prompt);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hubgen.toml");
        std::fs::write(
            &path,
            "[project]\nname = \"shop\"\n\n[generation]\noverwrite = \"never\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.project.name.as_deref(), Some("shop"));
        assert_eq!(cfg.project.extension, "dart");
        assert_eq!(cfg.generation.overwrite, OverwritePolicy::Never);
    }

    #[test]
    fn load_fails_for_missing_explicit_file() {
        let missing = PathBuf::from("/definitely/not/here/hubgen.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("project.extension").unwrap(), "dart");
        assert_eq!(cfg.get("output.no_color").unwrap(), "false");
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn with_value_sets_optional_and_typed_keys() {
        let cfg = AppConfig::default()
            .with_value("project.name", "my_app")
            .unwrap()
            .with_value("output.no_color", "true")
            .unwrap()
            .with_value("generation.overwrite", "always")
            .unwrap();
        assert_eq!(cfg.project.name.as_deref(), Some("my_app"));
        assert!(cfg.output.no_color);
        assert_eq!(cfg.generation.overwrite, OverwritePolicy::Always);
    }

    #[test]
    fn with_value_rejects_bad_policy() {
        let result = AppConfig::default().with_value("generation.overwrite", "maybe");
        assert!(matches!(result, Err(CliError::ConfigError { .. })));
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
