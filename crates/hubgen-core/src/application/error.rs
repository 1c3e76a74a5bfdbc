//! Application layer errors.
//!
//! These errors represent failures in orchestration, not model problems.
//! Model errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while rendering, writing or patching files.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Template name is not in the loaded bundle.
    #[error("Template '{name}' is not in the loaded bundle")]
    TemplateMissing { name: String },

    /// Template engine rejected the template or the context.
    #[error("Rendering '{template}' failed: {reason}")]
    RenderError { template: String, reason: String },

    /// Read or write fault on a target file.
    #[error("I/O failure at {path}: {reason}")]
    IoFailure { path: PathBuf, reason: String },

    /// Hub anchor not found; the patch was dropped and the file left intact.
    #[error("Anchor {anchor} not found in {path}")]
    AnchorNotFound { path: PathBuf, anchor: String },

    /// The project skeleton is missing, so hub files cannot be patched.
    #[error("Project at {root} is not initialised")]
    NotInitialized { root: PathBuf },

    /// Shared state behind a lock was poisoned.
    #[error("Internal store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::IoFailure {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateMissing { name } => vec![
                format!("No template named '{name}' was loaded"),
                "Try: hubgen templates to see the loaded bundle".into(),
                "Or point --templates at a bundle directory that has it".into(),
            ],
            Self::RenderError { template, .. } => vec![
                format!("Check the placeholders used in '{template}'"),
                "Every referenced key must exist in the context".into(),
            ],
            Self::IoFailure { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::AnchorNotFound { path, .. } => vec![
                format!("The anchor region of {} was edited by hand", path.display()),
                "Restore the anchor line or add the registration manually".into(),
            ],
            Self::NotInitialized { root } => vec![
                format!("Run: hubgen init --root {}", root.display()),
                "Or pass --init to generate".into(),
            ],
            Self::StoreLockError => vec![
                "A previous operation panicked while holding a lock".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::RenderError { .. } => ErrorCategory::Validation,
            Self::IoFailure { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::AnchorNotFound { .. } => ErrorCategory::NotFound,
            Self::NotInitialized { .. } => ErrorCategory::Configuration,
        }
    }
}
