//! Page and entity model.
//!
//! These are the inputs of a generation run. They are supplied in full by an
//! external collaborator (a JSON model file in the CLI) and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One typed field of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Target-language type name. Opaque to the generator.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub nullable: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// The field that identifies an entity row in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A data entity: one data-class file, optionally a local table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub unique_field: Option<UniqueField>,
    /// Register a table for this entity in the persistence bootstrap file.
    #[serde(default)]
    pub persist: bool,
}

impl EntitySpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unique_field: None,
            persist: false,
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn unique(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.unique_field = Some(UniqueField {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    pub fn persisted(mut self) -> Self {
        self.persist = true;
        self
    }

    /// Lower-cased name used in paths and insertion literals.
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }
}

/// How the page body is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLayout {
    #[default]
    List,
    Grid,
    CustomScrollView,
    Custom,
}

impl PageLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
            Self::CustomScrollView => "custom_scroll_view",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean UI switches for a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub app_bar: bool,
    pub drawer: bool,
    pub bottom_tab_bar: bool,
    pub top_tab_bar: bool,
    pub web_view: bool,
    pub action_button: bool,
    pub action_search: bool,
    pub list_view: bool,
    pub sliver_fixed_list: bool,
    pub sliver_grid: bool,
    pub sliver_to_box_adapter: bool,
    pub fab_in_app_bar: bool,
}

impl FeatureToggles {
    /// `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, bool); 12] {
        [
            ("app_bar", self.app_bar),
            ("drawer", self.drawer),
            ("bottom_tab_bar", self.bottom_tab_bar),
            ("top_tab_bar", self.top_tab_bar),
            ("web_view", self.web_view),
            ("action_button", self.action_button),
            ("action_search", self.action_search),
            ("list_view", self.list_view),
            ("sliver_fixed_list", self.sliver_fixed_list),
            ("sliver_grid", self.sliver_grid),
            ("sliver_to_box_adapter", self.sliver_to_box_adapter),
            ("fab_in_app_bar", self.fab_in_app_bar),
        ]
    }
}

/// Which view-model operations the page exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudCapabilities {
    pub query: bool,
    pub get: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl CrudCapabilities {
    pub fn all() -> Self {
        Self {
            query: true,
            get: true,
            create: true,
            update: true,
            delete: true,
        }
    }

    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("query", self.query),
            ("get", self.get),
            ("create", self.create),
            ("update", self.update),
            ("delete", self.delete),
        ]
    }
}

/// A page (feature) to scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub name: String,
    #[serde(default)]
    pub layout: PageLayout,
    #[serde(default)]
    pub toggles: FeatureToggles,
    #[serde(default)]
    pub crud: CrudCapabilities,
    /// Named action buttons; only used when `toggles.action_button` is set.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Generate only the view / view-model pair, with no state wiring.
    #[serde(default)]
    pub ui_only: bool,
    /// Place the feature under `features/customize/`.
    #[serde(default)]
    pub custom_widget: bool,
    #[serde(default)]
    pub primary_entity: Option<String>,
}

impl PageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: PageLayout::default(),
            toggles: FeatureToggles::default(),
            crud: CrudCapabilities::default(),
            actions: Vec::new(),
            ui_only: false,
            custom_widget: false,
            primary_entity: None,
        }
    }

    pub fn ui_only(mut self) -> Self {
        self.ui_only = true;
        self
    }

    pub fn layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn primary(mut self, entity: impl Into<String>) -> Self {
        self.primary_entity = Some(entity.into());
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toggles.action_button = true;
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn file_stem(&self) -> String {
        self.name.to_lowercase()
    }

    /// Resolve the primary entity among `entities`.
    pub fn primary_in<'a>(&self, entities: &'a [EntitySpec]) -> Option<&'a EntitySpec> {
        let name = self.primary_entity.as_deref()?;
        entities.iter().find(|e| e.name == name)
    }
}

/// The document the CLI reads: one page plus the entities it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    pub page: PageSpec,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
}
