// ============================================================================
// domain/error.rs - MODEL VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep copies)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("Duplicate entity name '{name}' (entity names must be unique, ignoring case)")]
    DuplicateEntity { name: String },

    #[error("Entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("Unique field '{field}' is not a field of entity '{entity}'")]
    UnknownUniqueField { entity: String, field: String },

    // ========================================================================
    // Page / Entity Wiring
    // ========================================================================
    #[error("Page '{page}' is not UI-only but names no primary entity")]
    MissingPrimaryEntity { page: String },

    #[error("Page '{page}' names primary entity '{entity}', which is not in the model")]
    UnknownPrimaryEntity { page: String, entity: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { kind, .. } => vec![
                format!("A {kind} name must start with a letter"),
                "Use only ASCII letters, digits, and underscores".into(),
                "Examples: Todo, UserProfile, order_item".into(),
            ],
            Self::DuplicateEntity { name } => vec![
                format!("Two entities resolve to the same name '{name}'"),
                "Generated paths are lower-cased, so 'Todo' and 'todo' collide".into(),
                "Rename or merge one of the entities".into(),
            ],
            Self::DuplicateField { entity, field } => vec![
                format!("Remove the repeated field '{field}' from '{entity}'"),
            ],
            Self::UnknownUniqueField { entity, .. } => vec![
                format!("Pick one of the fields declared on '{entity}' as the unique field"),
                "Or drop the unique_field entry entirely".into(),
            ],
            Self::MissingPrimaryEntity { .. } => vec![
                "Set page.primary_entity to one of the model's entities".into(),
                "Or mark the page as ui_only to generate only the view files".into(),
            ],
            Self::UnknownPrimaryEntity { entity, .. } => vec![
                format!("Add an entity named '{entity}' to the model"),
                "Or point page.primary_entity at an existing entity".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::DuplicateEntity { .. }
            | Self::DuplicateField { .. }
            | Self::UnknownUniqueField { .. } => ErrorCategory::Validation,
            Self::MissingPrimaryEntity { .. } => ErrorCategory::Validation,
            Self::UnknownPrimaryEntity { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
