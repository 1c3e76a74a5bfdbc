use std::collections::HashSet;

use crate::domain::{
    error::DomainError,
    model::{EntitySpec, PageSpec},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Validate a page together with the entities it owns.
    ///
    /// Entity names are compared case-insensitively since both paths and
    /// hub insertion literals use the lower-cased name.
    pub fn validate_model(page: &PageSpec, entities: &[EntitySpec]) -> Result<(), DomainError> {
        Self::validate_identifier("page", &page.name)?;

        let mut seen = HashSet::new();
        for entity in entities {
            Self::validate_entity(entity)?;
            if !seen.insert(entity.file_stem()) {
                return Err(DomainError::DuplicateEntity {
                    name: entity.name.clone(),
                });
            }
        }

        if page.ui_only {
            return Ok(());
        }

        let Some(primary) = page.primary_entity.as_deref() else {
            return Err(DomainError::MissingPrimaryEntity {
                page: page.name.clone(),
            });
        };
        if page.primary_in(entities).is_none() {
            return Err(DomainError::UnknownPrimaryEntity {
                page: page.name.clone(),
                entity: primary.to_owned(),
            });
        }
        Ok(())
    }

    pub fn validate_entity(entity: &EntitySpec) -> Result<(), DomainError> {
        Self::validate_identifier("entity", &entity.name)?;

        let mut seen = HashSet::new();
        for field in &entity.fields {
            Self::validate_identifier("field", &field.name)?;
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        if let Some(unique) = &entity.unique_field {
            if !seen.contains(unique.name.as_str()) {
                return Err(DomainError::UnknownUniqueField {
                    entity: entity.name.clone(),
                    field: unique.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Letters, digits and underscores, starting with a letter.
    pub fn validate_identifier(kind: &'static str, name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidName {
            kind,
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("cannot be empty")),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(invalid("must start with a letter"));
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(invalid(&format!("contains invalid character '{bad}'")));
        }
        Ok(())
    }
}
