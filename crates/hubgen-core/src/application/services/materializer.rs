//! File materializer: create, skip, or overwrite-after-confirmation.

use std::path::Path;

use tracing::{debug, info};

use crate::{
    application::ports::{FileStore, OverwritePrompt},
    domain::FileOutcome,
    error::HubgenResult,
};

/// Writes leaf files through a [`FileStore`], asking an [`OverwritePrompt`]
/// before replacing anything that already exists.
pub struct FileMaterializer<'a> {
    store: &'a dyn FileStore,
    prompt: &'a dyn OverwritePrompt,
}

impl<'a> FileMaterializer<'a> {
    pub fn new(store: &'a dyn FileStore, prompt: &'a dyn OverwritePrompt) -> Self {
        Self { store, prompt }
    }

    /// Returns `Written` or `Skipped`. A declined overwrite leaves the file
    /// exactly as it was; an accepted one replaces it fully.
    pub fn materialize(&self, path: &Path, content: &str) -> HubgenResult<FileOutcome> {
        if self.store.exists(path) {
            if !self.prompt.confirm_overwrite(path) {
                debug!(path = %path.display(), "overwrite declined");
                return Ok(FileOutcome::Skipped);
            }
        } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.store.create_dir_all(parent)?;
        }

        self.store.write_file(path, content)?;
        info!(path = %path.display(), bytes = content.len(), "file written");
        Ok(FileOutcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::output::MockFileStore};
    use mockall::predicate::eq;
    use std::path::PathBuf;

    fn never(_: &Path) -> bool {
        false
    }

    fn always(_: &Path) -> bool {
        true
    }

    #[test]
    fn creates_parents_then_writes_new_file() {
        let path = PathBuf::from("/p/data/model/todo_data.dart");
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);
        store
            .expect_create_dir_all()
            .with(eq(PathBuf::from("/p/data/model")))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_write_file()
            .withf(|_, c| c.contains("class Todo"))
            .times(1)
            .returning(|_, _| Ok(()));

        let out = FileMaterializer::new(&store, &never)
            .materialize(&path, "class Todo {}")
            .unwrap();
        assert_eq!(out, FileOutcome::Written);
    }

    #[test]
    fn declined_overwrite_skips_without_writing() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(true);
        store.expect_write_file().never();

        let out = FileMaterializer::new(&store, &never)
            .materialize(Path::new("/p/x.dart"), "new")
            .unwrap();
        assert_eq!(out, FileOutcome::Skipped);
    }

    #[test]
    fn accepted_overwrite_writes() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(true);
        store.expect_create_dir_all().never();
        store.expect_write_file().times(1).returning(|_, _| Ok(()));

        let out = FileMaterializer::new(&store, &always)
            .materialize(Path::new("/p/x.dart"), "new")
            .unwrap();
        assert_eq!(out, FileOutcome::Written);
    }

    #[test]
    fn write_fault_is_reported() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);
        store.expect_create_dir_all().returning(|_| Ok(()));
        store
            .expect_write_file()
            .returning(|p, _| Err(ApplicationError::io(p, "disk full").into()));

        let err = FileMaterializer::new(&store, &never)
            .materialize(Path::new("/p/x.dart"), "new")
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
