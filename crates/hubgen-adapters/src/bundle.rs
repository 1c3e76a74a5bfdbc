//! Template bundle discovery.
//!
//! The Flutter/Redux bundle ships embedded in this crate. A bundle directory
//! on disk overrides embedded templates name by name.
//!
//! # Resolution order
//!
//! The first candidate that exists and holds at least one `.hbs` file wins:
//!
//! 1. **explicit path** passed by the caller (`--templates`). It must exist.
//! 2. **`$HUBGEN_TEMPLATES_DIR`** environment variable override.
//! 3. **`./templates`** relative to the current working directory.
//! 4. **`<executable-dir>/templates`** sibling to the `hubgen` binary.
//!
//! With no candidate, only the embedded bundle is used.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use hubgen_core::error::{HubgenError, HubgenResult};

/// Environment variable naming a bundle directory.
pub const TEMPLATES_DIR_ENV: &str = "HUBGEN_TEMPLATES_DIR";

/// Template file suffix inside a bundle directory.
pub const TEMPLATE_SUFFIX: &str = ".hbs";

/// The embedded bundle as `(logical name, source)` pairs.
pub const BUILTIN: &[(&str, &str)] = &[
    ("action_report.dart.hbs", include_str!("../templates/action_report.dart.hbs")),
    ("actions.dart.hbs", include_str!("../templates/actions.dart.hbs")),
    ("app_reducer.dart.hbs", include_str!("../templates/app_reducer.dart.hbs")),
    ("app_state.dart.hbs", include_str!("../templates/app_state.dart.hbs")),
    ("database_client.dart.hbs", include_str!("../templates/database_client.dart.hbs")),
    ("main.dart.hbs", include_str!("../templates/main.dart.hbs")),
    ("middleware.dart.hbs", include_str!("../templates/middleware.dart.hbs")),
    ("model_entry_data.dart.hbs", include_str!("../templates/model_entry_data.dart.hbs")),
    ("page_data.dart.hbs", include_str!("../templates/page_data.dart.hbs")),
    ("pubspec.yaml.hbs", include_str!("../templates/pubspec.yaml.hbs")),
    ("reducer.dart.hbs", include_str!("../templates/reducer.dart.hbs")),
    ("repository.dart.hbs", include_str!("../templates/repository.dart.hbs")),
    ("repository_db.dart.hbs", include_str!("../templates/repository_db.dart.hbs")),
    ("state.dart.hbs", include_str!("../templates/state.dart.hbs")),
    ("store.dart.hbs", include_str!("../templates/store.dart.hbs")),
    ("view.dart.hbs", include_str!("../templates/view.dart.hbs")),
    ("view_model.dart.hbs", include_str!("../templates/view_model.dart.hbs")),
];

/// Pick the bundle directory to load, if any.
#[instrument]
pub fn discover(explicit: Option<&Path>) -> HubgenResult<Option<PathBuf>> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(HubgenError::Configuration {
                message: format!("template directory {} does not exist", dir.display()),
            });
        }
        info!(path = %dir.display(), "using explicit template directory");
        return Ok(Some(dir.to_path_buf()));
    }

    for candidate in candidate_paths() {
        debug!(path = %candidate.display(), "checking candidate templates path");
        if !candidate.is_dir() {
            continue;
        }
        if read_dir(&candidate)?.is_empty() {
            debug!(path = %candidate.display(), "no templates in directory, trying next");
            continue;
        }
        info!(path = %candidate.display(), "template directory found");
        return Ok(Some(candidate));
    }

    debug!("no template directory found, using embedded bundle only");
    Ok(None)
}

/// Every `*.hbs` file under `dir`, keyed by its `/`-separated relative path.
pub fn read_dir(dir: &Path) -> HubgenResult<Vec<(String, String)>> {
    let mut templates = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| HubgenError::Configuration {
            message: format!("cannot read template directory {}: {e}", dir.display()),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(dir) else {
            continue;
        };
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if !name.ends_with(TEMPLATE_SUFFIX) {
            continue;
        }
        let source = std::fs::read_to_string(path).map_err(|e| HubgenError::Configuration {
            message: format!("cannot read template {}: {e}", path.display()),
        })?;
        templates.push((name, source));
    }
    Ok(templates)
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }

    paths.push(PathBuf::from("templates"));

    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }

    paths
}

/// `<directory of current executable>/templates`, when resolvable.
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubgen_core::domain::layout::templates;
    use tempfile::TempDir;

    #[test]
    fn builtin_bundle_covers_every_required_template() {
        let names: Vec<&str> = BUILTIN.iter().map(|(name, _)| *name).collect();
        let page = hubgen_core::domain::PageSpec::new("Todos");
        for required in templates::for_page(&page)
            .into_iter()
            .chain(templates::bootstrap())
        {
            assert!(names.contains(&required), "missing {required}");
        }
    }

    #[test]
    fn reads_nested_templates_with_slash_names() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("extra")).unwrap();
        std::fs::write(dir.path().join("view.dart.hbs"), "v").unwrap();
        std::fs::write(dir.path().join("extra/widget.dart.hbs"), "w").unwrap();
        std::fs::write(dir.path().join("README.md"), "ignored").unwrap();

        let loaded = read_dir(dir.path()).unwrap();
        let names: Vec<_> = loaded.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["extra/widget.dart.hbs", "view.dart.hbs"]);
    }

    #[test]
    fn explicit_directory_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(discover(Some(&missing)).is_err());
        assert_eq!(
            discover(Some(dir.path())).unwrap().as_deref(),
            Some(dir.path())
        );
    }
}
