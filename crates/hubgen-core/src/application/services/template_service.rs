//! Template Service - template bundle queries.
//!
//! Separated from ScaffoldService for single responsibility.

use std::sync::Arc;

use crate::{
    application::ports::TemplateRenderer,
    domain::{PageSpec, layout::templates},
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    /// Used by `generate` or project initialisation.
    pub used: bool,
}

/// Service for template bundle operations.
pub struct TemplateService {
    renderer: Arc<dyn TemplateRenderer>,
}

impl TemplateService {
    pub fn new(renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self { renderer }
    }

    /// Every loaded template, sorted by name.
    pub fn list(&self) -> Vec<TemplateInfo> {
        let mut known = templates::bootstrap();
        known.extend(templates::for_page(&PageSpec::new("Page")));
        known.extend(templates::for_page(&PageSpec::new("Page").ui_only()));

        let mut names = self.renderer.template_names();
        names.sort();
        names
            .into_iter()
            .map(|name| TemplateInfo {
                used: known.iter().any(|k| *k == name),
                name,
            })
            .collect()
    }

    /// Templates a run for `page` needs that the bundle lacks.
    pub fn missing(&self, page: &PageSpec) -> Vec<String> {
        self.missing_from(templates::for_page(page))
    }

    /// Templates project initialisation needs that the bundle lacks.
    pub fn missing_bootstrap(&self) -> Vec<String> {
        self.missing_from(templates::bootstrap())
    }

    fn missing_from(&self, required: Vec<&'static str>) -> Vec<String> {
        required
            .into_iter()
            .filter(|name| !self.renderer.has_template(name))
            .map(str::to_owned)
            .collect()
    }
}
