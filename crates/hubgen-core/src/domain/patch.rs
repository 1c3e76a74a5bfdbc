//! Anchor-based incremental merge.
//!
//! Hub files are treated as opaque text. Each [`AnchorPatch`] says "after the
//! first occurrence of this anchor, insert this literal, unless the literal is
//! already somewhere in the file". Patches are applied in order, each against
//! the output of the previous one, so a later anchor may live inside text an
//! earlier patch inserted.
//!
//! A missing anchor drops the patch and leaves the content untouched. There is
//! no offset arithmetic that could splice text at the wrong position.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Where a patch is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Byte 0 of the file. Always resolvable; used for the import region.
    FileStart,
    /// Immediately after the first occurrence of the literal.
    After(Cow<'static, str>),
}

impl Anchor {
    pub const fn after(literal: &'static str) -> Self {
        Self::After(Cow::Borrowed(literal))
    }

    /// Byte offset at which the insertion goes, if the anchor resolves.
    fn resolve(&self, content: &str) -> Option<usize> {
        match self {
            Self::FileStart => Some(0),
            Self::After(literal) => content.find(literal.as_ref()).map(|at| at + literal.len()),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileStart => f.write_str("<start of file>"),
            Self::After(literal) => write!(f, "{literal:?}"),
        }
    }
}

/// One idempotent insertion into a hub file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPatch {
    /// Hub file path, relative to the project root.
    pub target: PathBuf,
    pub anchor: Anchor,
    pub insertion: String,
}

impl AnchorPatch {
    pub fn new(target: impl Into<PathBuf>, anchor: Anchor, insertion: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            anchor,
            insertion: insertion.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Result of merging a patch list into one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub content: String,
    /// True iff at least one patch inserted text.
    pub changed: bool,
    /// Patches skipped because their literal was already present.
    pub already_present: usize,
    /// Anchors that could not be found; their patches were dropped.
    pub missing_anchors: Vec<Anchor>,
}

/// Applies [`AnchorPatch`] lists to text.
pub struct AnchorMerger;

impl AnchorMerger {
    /// Apply `patches` in order to `content`.
    pub fn apply<'a, I>(content: &str, patches: I) -> MergeOutcome
    where
        I: IntoIterator<Item = &'a AnchorPatch>,
    {
        let mut current = content.to_owned();
        let mut changed = false;
        let mut already_present = 0;
        let mut missing_anchors = Vec::new();

        for patch in patches {
            if current.contains(&patch.insertion) {
                already_present += 1;
                continue;
            }

            match patch.anchor.resolve(&current) {
                Some(at) => {
                    current.insert_str(at, &patch.insertion);
                    changed = true;
                    debug!(
                        target_file = %patch.target.display(),
                        anchor = %patch.anchor,
                        "inserted patch"
                    );
                }
                None => {
                    warn!(
                        target_file = %patch.target.display(),
                        anchor = %patch.anchor,
                        "anchor not found, patch dropped"
                    );
                    missing_anchors.push(patch.anchor.clone());
                }
            }
        }

        MergeOutcome {
            content: current,
            changed,
            already_present,
            missing_anchors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(anchor: Anchor, insertion: &str) -> AnchorPatch {
        AnchorPatch::new("state/app/app_state.dart", anchor, insertion)
    }

    #[test]
    fn inserts_after_first_occurrence() {
        let patches = [patch(Anchor::after("{"), "X")];
        let out = AnchorMerger::apply("a { b { c", &patches);
        assert_eq!(out.content, "a {X b { c");
        assert!(out.changed);
    }

    #[test]
    fn file_start_prepends() {
        let patches = [patch(Anchor::FileStart, "import 'x';\n")];
        let out = AnchorMerger::apply("class A {}", &patches);
        assert_eq!(out.content, "import 'x';\nclass A {}");
    }

    #[test]
    fn reapplying_is_a_no_op() {
        let patches = [
            patch(Anchor::FileStart, "import 'todo';\n"),
            patch(Anchor::after("class AppState {"), "\n  final TodoState todoState;"),
        ];
        let first = AnchorMerger::apply("class AppState {\n}", &patches);
        let second = AnchorMerger::apply(&first.content, &patches);

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.content, first.content);
        assert_eq!(second.already_present, 2);
    }

    #[test]
    fn missing_anchor_leaves_content_untouched() {
        let patches = [patch(Anchor::after("middleware: []"), "\n  ..addAll(x)")];
        let out = AnchorMerger::apply("Store(reducer)", &patches);

        assert_eq!(out.content, "Store(reducer)");
        assert!(!out.changed);
        assert_eq!(out.missing_anchors, vec![Anchor::after("middleware: []")]);
    }

    #[test]
    fn missing_anchor_does_not_block_later_patches() {
        let patches = [
            patch(Anchor::after("nowhere"), "A"),
            patch(Anchor::after("here"), "B"),
        ];
        let out = AnchorMerger::apply("here", &patches);
        assert_eq!(out.content, "hereB");
        assert_eq!(out.missing_anchors.len(), 1);
    }

    #[test]
    fn later_anchor_may_come_from_earlier_insertion() {
        let patches = [
            patch(Anchor::after("{"), "\n  slot: [];"),
            patch(Anchor::after("slot: ["), "item"),
        ];
        let out = AnchorMerger::apply("x {\n}", &patches);
        assert_eq!(out.content, "x {\n  slot: [item];\n}");
    }

    #[test]
    fn distinct_entities_each_land_once_in_either_order() {
        let todo = patch(Anchor::after("class AppState {"), "\n  final TodoState todoState;");
        let note = patch(Anchor::after("class AppState {"), "\n  final NoteState noteState;");
        let base = "class AppState {\n}";

        for order in [[&todo, &note], [&note, &todo]] {
            let once = AnchorMerger::apply(base, order);
            let twice = AnchorMerger::apply(&once.content, [&todo, &note]);
            assert_eq!(twice.content, once.content);
            assert_eq!(once.content.matches("todoState;").count(), 1);
            assert_eq!(once.content.matches("noteState;").count(), 1);
        }
    }

    #[test]
    fn empty_patch_list_is_unchanged() {
        let none: [AnchorPatch; 0] = [];
        let out = AnchorMerger::apply("body", &none);
        assert_eq!(out.content, "body");
        assert!(!out.changed);
    }
}
