//! Hub patcher: read a hub file, merge patches, write only on change.

use std::path::Path;

use tracing::{debug, warn};

use crate::{
    application::{ApplicationError, ports::FileStore},
    domain::{AnchorMerger, AnchorPatch, FileOutcome},
    error::HubgenResult,
};

/// Result of patching one hub file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubPatchResult {
    pub outcome: FileOutcome,
    /// One note per dropped patch.
    pub notes: Vec<String>,
}

pub struct HubPatcher<'a> {
    store: &'a dyn FileStore,
}

impl<'a> HubPatcher<'a> {
    pub fn new(store: &'a dyn FileStore) -> Self {
        Self { store }
    }

    /// Apply `patches` to the hub at `path`. A missing hub file is an
    /// `IoFailure`; a missing anchor is a note, never an error.
    pub fn patch(&self, path: &Path, patches: &[AnchorPatch]) -> HubgenResult<HubPatchResult> {
        if !self.store.exists(path) {
            return Err(ApplicationError::io(path, "hub file does not exist").into());
        }

        let current = self.store.read_to_string(path)?;
        let merged = AnchorMerger::apply(&current, patches);

        let notes: Vec<String> = merged
            .missing_anchors
            .iter()
            .map(|anchor| {
                ApplicationError::AnchorNotFound {
                    path: path.to_path_buf(),
                    anchor: anchor.to_string(),
                }
                .to_string()
            })
            .collect();
        if !notes.is_empty() {
            warn!(path = %path.display(), dropped = notes.len(), "hub patches dropped");
        }

        let outcome = if merged.changed {
            self.store.write_file(path, &merged.content)?;
            FileOutcome::Written
        } else {
            debug!(
                path = %path.display(),
                already_present = merged.already_present,
                "hub unchanged"
            );
            FileOutcome::Unchanged
        };

        Ok(HubPatchResult { outcome, notes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockFileStore;
    use crate::domain::Anchor;

    fn patches() -> Vec<AnchorPatch> {
        vec![AnchorPatch::new(
            "state/app/app_state.dart",
            Anchor::after("class AppState {"),
            "\n  final TodoState todoState;",
        )]
    }

    #[test]
    fn writes_merged_content() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(true);
        store
            .expect_read_to_string()
            .returning(|_| Ok("class AppState {\n}".into()));
        store
            .expect_write_file()
            .withf(|_, c| c.contains("final TodoState todoState;"))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = HubPatcher::new(&store)
            .patch(Path::new("/p/state/app/app_state.dart"), &patches())
            .unwrap();
        assert_eq!(result.outcome, FileOutcome::Written);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn already_patched_hub_is_not_rewritten() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(true);
        store
            .expect_read_to_string()
            .returning(|_| Ok("class AppState {\n  final TodoState todoState;\n}".into()));
        store.expect_write_file().never();

        let result = HubPatcher::new(&store)
            .patch(Path::new("/p/a.dart"), &patches())
            .unwrap();
        assert_eq!(result.outcome, FileOutcome::Unchanged);
    }

    #[test]
    fn missing_anchor_becomes_a_note() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(true);
        store
            .expect_read_to_string()
            .returning(|_| Ok("// edited by hand".into()));
        store.expect_write_file().never();

        let result = HubPatcher::new(&store)
            .patch(Path::new("/p/a.dart"), &patches())
            .unwrap();
        assert_eq!(result.outcome, FileOutcome::Unchanged);
        assert_eq!(result.notes.len(), 1);
        assert!(result.notes[0].contains("class AppState {"));
    }

    #[test]
    fn missing_hub_is_io_failure() {
        let mut store = MockFileStore::new();
        store.expect_exists().return_const(false);

        let err = HubPatcher::new(&store)
            .patch(Path::new("/p/a.dart"), &patches())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::HubgenError::Application(ApplicationError::IoFailure { .. })
        ));
    }
}
