//! Generation report and per-run state machine.
//!
//! The report has one entry per intended file, in the order the run touched
//! them. It is meant to be rendered by a UI; nothing here prints.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Phases of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    BuildingContext,
    EmittingLeafFiles,
    PatchingHubFiles,
    EmittingFeatureFiles,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::BuildingContext => "building context",
            Self::EmittingLeafFiles => "emitting leaf files",
            Self::PatchingHubFiles => "patching hub files",
            Self::EmittingFeatureFiles => "emitting feature files",
        })
    }
}

/// Where a run currently is, or how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    Running { phase: RunPhase },
    Done,
    /// Unrecoverable fault. Files already written stay written.
    Failed { phase: RunPhase, reason: String },
}

impl RunState {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What kind of file an entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    /// Generated fresh each run, never merged.
    Leaf,
    /// Anchor-patched aggregate file.
    Hub,
    /// View / view-model pair.
    Feature,
    /// Project skeleton written by initialisation.
    Bootstrap,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leaf => "leaf",
            Self::Hub => "hub",
            Self::Feature => "feature",
            Self::Bootstrap => "bootstrap",
        })
    }
}

/// Outcome for one target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Written,
    /// File existed and overwrite was declined.
    Skipped,
    /// Hub file already held every insertion (or no anchor resolved).
    Unchanged,
    Failed { error: String },
}

impl FileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Skipped => "skipped",
            Self::Unchanged => "unchanged",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub role: FileRole,
    #[serde(flatten)]
    pub outcome: FileOutcome,
    /// Non-fatal remarks, e.g. anchors that were not found.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ReportEntry {
    pub fn new(path: impl Into<PathBuf>, role: FileRole, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            role,
            outcome,
            notes: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// Per-run summary, one entry per intended file.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub state: RunState,
    pub entries: Vec<ReportEntry>,
}

impl GenerationReport {
    pub fn start(root: impl Into<PathBuf>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            root: root.into(),
            started_at: Utc::now(),
            finished_at: None,
            state: RunState::Running {
                phase: RunPhase::Idle,
            },
            entries: Vec::new(),
        }
    }

    /// Move to `phase`. Ignored once the run has finished.
    pub fn enter(&mut self, phase: RunPhase) {
        if matches!(self.state, RunState::Running { .. }) {
            self.state = RunState::Running { phase };
        }
    }

    pub fn phase(&self) -> Option<RunPhase> {
        match &self.state {
            RunState::Running { phase } | RunState::Failed { phase, .. } => Some(*phase),
            RunState::Done => None,
        }
    }

    pub fn record(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn finish(mut self) -> Self {
        if matches!(self.state, RunState::Running { .. }) {
            self.state = RunState::Done;
        }
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn fail(mut self, reason: impl Into<String>) -> Self {
        let phase = self.phase().unwrap_or(RunPhase::Idle);
        self.state = RunState::Failed {
            phase,
            reason: reason.into(),
        };
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn entry(&self, path: impl AsRef<Path>) -> Option<&ReportEntry> {
        let path = path.as_ref();
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.label() == label)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.state.is_failed()
            || self
                .entries
                .iter()
                .any(|e| matches!(e.outcome, FileOutcome::Failed { .. }))
    }
}
