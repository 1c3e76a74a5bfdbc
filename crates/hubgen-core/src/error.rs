//! Unified error handling for hubgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for hubgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HubgenError {
    /// Errors from the domain layer (invalid model).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (render, I/O, patching).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl HubgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in hubgen".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error stops the whole run instead of one file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::StoreLockError | ApplicationError::NotInitialized { .. }
            ) | Self::Internal { .. }
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type HubgenResult<T> = Result<T, HubgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_and_init_errors_are_fatal() {
        assert!(HubgenError::from(ApplicationError::StoreLockError).is_fatal());
        assert!(
            HubgenError::from(ApplicationError::NotInitialized { root: "/x".into() }).is_fatal()
        );
        assert!(
            !HubgenError::from(ApplicationError::TemplateMissing { name: "a".into() }).is_fatal()
        );
    }

    #[test]
    fn domain_categories_map_through() {
        let err = HubgenError::from(DomainError::DuplicateEntity { name: "Todo".into() });
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
