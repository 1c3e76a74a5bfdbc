//! Template context.
//!
//! A **Value Object** holding everything a template may reference. Keys keep
//! insertion order so that serialized contexts (and therefore renders) are
//! stable run to run. A context is never mutated once built; per-entity
//! variants are derived with [`TemplateContext::with_overrides`].

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::domain::model::{EntitySpec, PageLayout, PageSpec};

/// A single context value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Str(String),
    Bool(bool),
    Int(i64),
    /// Nested list of maps (fields, action buttons).
    List(Vec<TemplateContext>),
}

impl ContextValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TemplateContext]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ContextValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<usize> for ContextValue {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<Vec<TemplateContext>> for ContextValue {
    fn from(items: Vec<TemplateContext>) -> Self {
        Self::List(items)
    }
}

impl Serialize for ContextValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Insertion-ordered mapping from symbolic name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    entries: Vec<(String, ContextValue)>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Re-inserting a key replaces its value in place,
    /// keeping the original position.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.set(key.into(), value.into());
        self
    }

    /// Derive a copy with `overrides` applied. `self` is left untouched.
    pub fn with_overrides<I, K>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, ContextValue)>,
        K: Into<String>,
    {
        let mut derived = self.clone();
        for (key, value) in overrides {
            derived.set(key.into(), value);
        }
        derived
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Convenience accessor for string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ContextValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, key: String, value: ContextValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    // ------------------------------------------------------------------------
    // Construction from the model
    // ------------------------------------------------------------------------

    /// Shared context for one run, built from the page alone.
    pub fn for_page(project_name: &str, page: &PageSpec) -> Self {
        let mut ctx = Self::new()
            .with("project_name", project_name.to_lowercase())
            .with("page_name", page.name.as_str())
            .with("page_name_lower", page.file_stem())
            .with("layout", page.layout.as_str())
            .with(
                "is_custom_scroll_view",
                page.layout == PageLayout::CustomScrollView,
            );

        for (toggle, on) in page.toggles.entries() {
            ctx = ctx.with(format!("has_{toggle}"), on);
        }
        for (op, on) in page.crud.entries() {
            ctx = ctx.with(format!("can_{op}"), on);
        }

        let with_actions = page.toggles.action_button;
        let actions: Vec<TemplateContext> = if with_actions {
            page.actions
                .iter()
                .map(|a| Self::new().with("name", a.as_str()))
                .collect()
        } else {
            Vec::new()
        };

        ctx.with("is_custom_widget", page.custom_widget)
            .with("action_count", actions.len())
            .with("actions", actions)
            .with("has_action_search", with_actions && page.toggles.action_search)
            .with("is_ui_only", page.ui_only)
            .with_overrides(entity_placeholders())
    }

    /// Context for the project skeleton, which knows nothing but the name.
    pub fn for_project(project_name: &str) -> Self {
        Self::new().with("project_name", project_name.to_lowercase())
    }

    /// Copy of `self` with the entity-specific keys set for `entity`.
    pub fn for_entity(&self, entity: &EntitySpec) -> Self {
        self.with_overrides(entity_entries(entity))
    }
}

/// Entity keys are always present so templates never see an unknown key;
/// a UI-only page keeps these empty values.
fn entity_placeholders() -> Vec<(&'static str, ContextValue)> {
    vec![
        ("entity_name", "".into()),
        ("entity_name_lower", "".into()),
        ("persist", false.into()),
        ("has_unique_field", false.into()),
        ("unique_field", "".into()),
        ("unique_field_type", "".into()),
        ("fields", Vec::<TemplateContext>::new().into()),
    ]
}

fn entity_entries(entity: &EntitySpec) -> Vec<(&'static str, ContextValue)> {
    let unique_name = entity.unique_field.as_ref().map(|u| u.name.as_str());
    let fields: Vec<TemplateContext> = entity
        .fields
        .iter()
        .map(|f| {
            TemplateContext::new()
                .with("name", f.name.as_str())
                .with("type", f.ty.as_str())
                .with("nullable", f.nullable)
                .with("is_unique", unique_name == Some(f.name.as_str()))
        })
        .collect();

    vec![
        ("entity_name", entity.name.as_str().into()),
        ("entity_name_lower", entity.file_stem().into()),
        ("persist", entity.persist.into()),
        ("has_unique_field", entity.unique_field.is_some().into()),
        (
            "unique_field",
            entity
                .unique_field
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_default()
                .into(),
        ),
        (
            "unique_field_type",
            entity
                .unique_field
                .as_ref()
                .map(|u| u.ty.clone())
                .unwrap_or_default()
                .into(),
        ),
        ("fields", fields.into()),
    ]
}

impl Serialize for TemplateContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
