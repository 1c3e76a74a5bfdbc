//! Non-interactive overwrite prompts.

use std::path::Path;

use hubgen_core::application::ports::OverwritePrompt;
use tracing::debug;

/// Answers every overwrite question the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(bool);

impl FixedAnswer {
    /// Overwrite every existing file.
    pub const fn always() -> Self {
        Self(true)
    }

    /// Never touch an existing file.
    pub const fn never() -> Self {
        Self(false)
    }
}

impl OverwritePrompt for FixedAnswer {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        debug!(path = %path.display(), overwrite = self.0, "fixed overwrite answer");
        self.0
    }
}
