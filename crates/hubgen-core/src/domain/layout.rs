//! Generated artifact layout.
//!
//! Every path here is relative to the project root handed in by the caller.
//! Names are derived by lower-casing the entity/page name and appending a
//! fixed suffix token.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    model::{EntitySpec, PageSpec},
};

/// The four per-entity state files under `state/<entity>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFile {
    Actions,
    Middleware,
    Reducer,
    State,
}

impl StateFile {
    pub const ALL: [StateFile; 4] = [Self::Actions, Self::Middleware, Self::Reducer, Self::State];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Actions => "_actions",
            Self::Middleware => "_middleware",
            Self::Reducer => "_reducer",
            Self::State => "_state",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Actions => "actions.dart.hbs",
            Self::Middleware => "middleware.dart.hbs",
            Self::Reducer => "reducer.dart.hbs",
            Self::State => "state.dart.hbs",
        }
    }
}

/// Logical names of the templates a run renders.
pub mod templates {
    use super::StateFile;
    use crate::domain::{hub::HubFile, model::PageSpec};

    pub const ENTITY_DATA: &str = "model_entry_data.dart.hbs";
    pub const REPOSITORY: &str = "repository.dart.hbs";
    pub const REPOSITORY_DB: &str = "repository_db.dart.hbs";
    pub const VIEW: &str = "view.dart.hbs";
    pub const VIEW_MODEL: &str = "view_model.dart.hbs";
    pub const MAIN: &str = "main.dart.hbs";
    pub const PAGE_DATA: &str = "page_data.dart.hbs";
    pub const ACTION_REPORT: &str = "action_report.dart.hbs";
    pub const PUBSPEC: &str = "pubspec.yaml.hbs";

    /// Templates `generate` may render for `page`.
    pub fn for_page(page: &PageSpec) -> Vec<&'static str> {
        if page.ui_only {
            return vec![VIEW_MODEL, VIEW];
        }
        let mut names = vec![ENTITY_DATA, REPOSITORY, REPOSITORY_DB];
        names.extend(StateFile::ALL.iter().map(StateFile::template));
        names.extend([VIEW_MODEL, VIEW]);
        names
    }

    /// Templates project initialisation renders.
    pub fn bootstrap() -> Vec<&'static str> {
        let mut names: Vec<_> = HubFile::ALL.iter().map(HubFile::template).collect();
        names.extend([MAIN, PAGE_DATA, ACTION_REPORT, PUBSPEC]);
        names
    }
}

/// Directory names that mark an initialised project.
pub const SKELETON_DIRS: [&str; 3] = ["state", "data", "features"];

/// Path derivation for one target project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    /// File extension of generated sources, without the dot.
    extension: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            extension: "dart".into(),
        }
    }
}

impl ProjectLayout {
    pub fn new(extension: impl Into<String>) -> Result<Self, DomainError> {
        let extension = extension.into();
        let trimmed = extension.trim_start_matches('.');
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
            return Err(DomainError::InvalidName {
                kind: "extension",
                name: extension.clone(),
                reason: "must be a bare file extension such as 'dart'".into(),
            });
        }
        Ok(Self {
            extension: trimmed.to_owned(),
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn file(&self, dir: impl Into<PathBuf>, stem: &str) -> PathBuf {
        dir.into().join(format!("{stem}.{}", self.extension))
    }

    // -- leaf files ----------------------------------------------------------

    pub fn entity_data(&self, entity: &EntitySpec) -> PathBuf {
        self.file("data/model", &format!("{}_data", entity.file_stem()))
    }

    pub fn repository(&self, entity: &EntitySpec) -> PathBuf {
        self.file("data/remote", &format!("{}_repository", entity.file_stem()))
    }

    pub fn repository_db(&self, entity: &EntitySpec) -> PathBuf {
        self.file("data/db", &format!("{}_repository_db", entity.file_stem()))
    }

    pub fn state_file(&self, entity: &EntitySpec, kind: StateFile) -> PathBuf {
        let stem = entity.file_stem();
        self.file(
            PathBuf::from("state").join(&stem),
            &format!("{stem}{}", kind.suffix()),
        )
    }

    fn feature_dir(&self, page: &PageSpec) -> PathBuf {
        let base = if page.custom_widget {
            PathBuf::from("features/customize")
        } else {
            PathBuf::from("features")
        };
        base.join(page.file_stem())
    }

    pub fn feature_view(&self, page: &PageSpec) -> PathBuf {
        self.file(self.feature_dir(page), &format!("{}_view", page.file_stem()))
    }

    pub fn feature_view_model(&self, page: &PageSpec) -> PathBuf {
        self.file(
            self.feature_dir(page),
            &format!("{}_view_model", page.file_stem()),
        )
    }

    // -- hub files -----------------------------------------------------------

    pub fn app_state(&self) -> PathBuf {
        self.file("state/app", "app_state")
    }

    pub fn app_reducer(&self) -> PathBuf {
        self.file("state/app", "app_reducer")
    }

    pub fn store(&self) -> PathBuf {
        self.file("state", "store")
    }

    pub fn database_client(&self) -> PathBuf {
        self.file("data/db", "database_client")
    }

    // -- bootstrap-only files ------------------------------------------------

    pub fn main(&self) -> PathBuf {
        self.file("", "main")
    }

    pub fn page_data(&self) -> PathBuf {
        self.file("data/model", "page_data")
    }

    pub fn action_report(&self) -> PathBuf {
        self.file("state", "action_report")
    }

    /// Package manifest. Lives in the package directory, one level above
    /// the source root.
    pub fn pubspec(&self) -> PathBuf {
        PathBuf::from("../pubspec.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_paths_are_lower_cased() {
        let layout = ProjectLayout::default();
        let e = EntitySpec::new("TodoItem");
        assert_eq!(layout.entity_data(&e), PathBuf::from("data/model/todoitem_data.dart"));
        assert_eq!(
            layout.repository(&e),
            PathBuf::from("data/remote/todoitem_repository.dart")
        );
        assert_eq!(
            layout.repository_db(&e),
            PathBuf::from("data/db/todoitem_repository_db.dart")
        );
        assert_eq!(
            layout.state_file(&e, StateFile::Middleware),
            PathBuf::from("state/todoitem/todoitem_middleware.dart")
        );
    }

    #[test]
    fn feature_paths_respect_custom_widget() {
        let layout = ProjectLayout::default();
        let mut page = PageSpec::new("Settings");
        assert_eq!(
            layout.feature_view_model(&page),
            PathBuf::from("features/settings/settings_view_model.dart")
        );
        page.custom_widget = true;
        assert_eq!(
            layout.feature_view(&page),
            PathBuf::from("features/customize/settings/settings_view.dart")
        );
    }

    #[test]
    fn hub_paths() {
        let layout = ProjectLayout::default();
        assert_eq!(layout.app_state(), PathBuf::from("state/app/app_state.dart"));
        assert_eq!(layout.app_reducer(), PathBuf::from("state/app/app_reducer.dart"));
        assert_eq!(layout.store(), PathBuf::from("state/store.dart"));
        assert_eq!(layout.main(), PathBuf::from("main.dart"));
        assert_eq!(layout.pubspec(), PathBuf::from("../pubspec.yaml"));
    }

    #[test]
    fn ui_only_page_needs_two_templates() {
        let page = PageSpec::new("About").ui_only();
        assert_eq!(templates::for_page(&page), [templates::VIEW_MODEL, templates::VIEW]);
        assert_eq!(templates::for_page(&PageSpec::new("Todos")).len(), 9);
        assert_eq!(templates::bootstrap().len(), 8);
    }

    #[test]
    fn extension_is_normalised() {
        let layout = ProjectLayout::new(".ts").unwrap();
        assert_eq!(layout.store(), PathBuf::from("state/store.ts"));
        assert!(ProjectLayout::new("").is_err());
        assert!(ProjectLayout::new("a/b").is_err());
    }
}
