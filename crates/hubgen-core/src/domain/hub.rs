//! Hub files and their insertion slots.
//!
//! A hub file aggregates references to every entity in the project. Each one
//! exposes a short ordered list of named slots; a slot pairs an anchor with
//! the shape of the fragment inserted there. Patches for one entity are built
//! in slot order, import region first.
//!
//! Within one hub file no two insertion literals for the same entity may be
//! substrings of each other, otherwise the presence check of a later patch
//! would match the text of an earlier one.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{
    layout::ProjectLayout,
    model::EntitySpec,
    patch::{Anchor, AnchorPatch},
};

/// The four hub files a project carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HubFile {
    AppState,
    AppReducer,
    Store,
    DatabaseClient,
}

/// A named insertion point inside a hub file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Imports,
    Fields,
    Constructor,
    InitialState,
    Reducers,
    Middleware,
    OnUpgrade,
    OnOpen,
}

impl Slot {
    pub fn anchor(&self) -> Anchor {
        match self {
            Self::Imports => Anchor::FileStart,
            Self::Fields => Anchor::after("class AppState {"),
            Self::Constructor => Anchor::after("AppState({"),
            Self::InitialState | Self::Reducers => Anchor::after("return AppState("),
            Self::Middleware => Anchor::after("middleware: []"),
            Self::OnUpgrade => Anchor::after("onUpgrade: (d, o, n) {"),
            Self::OnOpen => Anchor::after("onOpen: (d) {"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Imports => "imports",
            Self::Fields => "fields",
            Self::Constructor => "constructor",
            Self::InitialState => "initial_state",
            Self::Reducers => "reducers",
            Self::Middleware => "middleware",
            Self::OnUpgrade => "on_upgrade",
            Self::OnOpen => "on_open",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl HubFile {
    /// Hubs patched for the page's primary entity, in patch order.
    pub const STATE_HUBS: [HubFile; 3] = [Self::AppState, Self::AppReducer, Self::Store];

    pub const ALL: [HubFile; 4] = [
        Self::AppState,
        Self::AppReducer,
        Self::Store,
        Self::DatabaseClient,
    ];

    pub fn path(&self, layout: &ProjectLayout) -> PathBuf {
        match self {
            Self::AppState => layout.app_state(),
            Self::AppReducer => layout.app_reducer(),
            Self::Store => layout.store(),
            Self::DatabaseClient => layout.database_client(),
        }
    }

    /// Template that renders the empty hub during project initialisation.
    pub fn template(&self) -> &'static str {
        match self {
            Self::AppState => "app_state.dart.hbs",
            Self::AppReducer => "app_reducer.dart.hbs",
            Self::Store => "store.dart.hbs",
            Self::DatabaseClient => "database_client.dart.hbs",
        }
    }

    pub fn slots(&self) -> &'static [Slot] {
        match self {
            Self::AppState => &[Slot::Imports, Slot::Fields, Slot::Constructor, Slot::InitialState],
            Self::AppReducer => &[Slot::Imports, Slot::Reducers],
            Self::Store => &[Slot::Imports, Slot::Middleware],
            Self::DatabaseClient => &[Slot::Imports, Slot::OnUpgrade, Slot::OnOpen],
        }
    }

    /// Patches registering `entity` in this hub, one per slot.
    pub fn patches_for(
        &self,
        layout: &ProjectLayout,
        project: &str,
        entity: &EntitySpec,
    ) -> Vec<AnchorPatch> {
        let target = self.path(layout);
        let names = Names::new(project, entity, layout.extension());
        self.slots()
            .iter()
            .map(|slot| AnchorPatch::new(target.clone(), slot.anchor(), self.fragment(*slot, &names)))
            .collect()
    }

    fn fragment(&self, slot: Slot, n: &Names) -> String {
        let Names { project: p, upper: e_up, lower: e, ext } = n;
        match (self, slot) {
            (Self::AppState, Slot::Imports) => {
                format!("import 'package:{p}/state/{e}/{e}_state.{ext}';\n")
            }
            (Self::AppReducer, Slot::Imports) => {
                format!("import 'package:{p}/state/{e}/{e}_reducer.{ext}';\n")
            }
            (Self::Store, Slot::Imports) => {
                format!("import 'package:{p}/state/{e}/{e}_middleware.{ext}';\n")
            }
            (Self::DatabaseClient, Slot::Imports) => {
                format!("import 'package:{p}/data/model/{e}_data.{ext}';\n")
            }
            (_, Slot::Fields) => format!("\n  final {e_up}State {e}State;"),
            (_, Slot::Constructor) => format!("\n    @required this.{e}State,"),
            (_, Slot::InitialState) => format!(
                "\n        {e}State: {e_up}State(\n            {e}: null,\n            {e}s: Map(),\n            status: Map(),\n            page: Page(),),"
            ),
            (_, Slot::Reducers) => format!("\n    {e}State: {e}Reducer(state.{e}State, action),"),
            (_, Slot::Middleware) => format!("\n      ..addAll(create{e_up}Middleware())"),
            (_, Slot::OnUpgrade) => format!("\n      {e_up}.upgradeTable(d, o, n);"),
            (_, Slot::OnOpen) => format!("\n      {e_up}.createTable(d);"),
        }
    }
}

impl fmt::Display for HubFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AppState => "app_state",
            Self::AppReducer => "app_reducer",
            Self::Store => "store",
            Self::DatabaseClient => "database_client",
        })
    }
}

struct Names {
    project: String,
    upper: String,
    lower: String,
    ext: String,
}

impl Names {
    fn new(project: &str, entity: &EntitySpec, ext: &str) -> Self {
        Self {
            project: project.to_lowercase(),
            upper: entity.name.clone(),
            lower: entity.file_stem(),
            ext: ext.to_owned(),
        }
    }
}
