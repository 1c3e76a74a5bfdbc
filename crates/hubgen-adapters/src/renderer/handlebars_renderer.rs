//! Handlebars renderer.
//!
//! Templates are registered once, at construction, and cached by logical
//! name for the life of the renderer. Strict mode is on, so a template that
//! references a key the context lacks fails instead of rendering blanks.
//! HTML escaping is off since the output is source code.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use tracing::{debug, instrument};

use hubgen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::TemplateContext,
    error::HubgenResult,
};

use crate::bundle;

/// Where the loaded templates came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSource {
    Builtin,
    /// Embedded bundle with overrides from this directory.
    Directory(PathBuf),
}

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    source: BundleSource,
}

impl HandlebarsRenderer {
    /// Empty renderer; register templates with [`Self::register`].
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            registry,
            source: BundleSource::Builtin,
        }
    }

    /// Renderer over the embedded bundle.
    pub fn builtin() -> HubgenResult<Self> {
        let mut renderer = Self::new();
        for (name, source) in bundle::BUILTIN {
            renderer.register(name, source)?;
        }
        Ok(renderer)
    }

    /// Embedded bundle overridden by every template under `dir`.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn from_dir(dir: &Path) -> HubgenResult<Self> {
        let mut renderer = Self::builtin()?;
        let overrides = bundle::read_dir(dir)?;
        debug!(count = overrides.len(), "registering directory templates");
        for (name, source) in overrides {
            renderer.register(&name, &source)?;
        }
        renderer.source = BundleSource::Directory(dir.to_path_buf());
        Ok(renderer)
    }

    /// Resolve the bundle directory (see [`bundle::discover`]) and load it.
    pub fn discover(explicit: Option<&Path>) -> HubgenResult<Self> {
        match bundle::discover(explicit)? {
            Some(dir) => Self::from_dir(&dir),
            None => Self::builtin(),
        }
    }

    /// Register or replace one template.
    pub fn register(&mut self, name: &str, source: &str) -> HubgenResult<()> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| {
                ApplicationError::RenderError {
                    template: name.to_owned(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    pub fn source(&self) -> &BundleSource {
        &self.source
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, context: &TemplateContext) -> HubgenResult<String> {
        if !self.registry.has_template(name) {
            return Err(ApplicationError::TemplateMissing {
                name: name.to_owned(),
            }
            .into());
        }
        self.registry.render(name, context).map_err(|e| {
            ApplicationError::RenderError {
                template: name.to_owned(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.get_templates().keys().cloned().collect();
        names.sort();
        names
    }
}
