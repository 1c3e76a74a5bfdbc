//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hubgen-adapters` crate provides implementations.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::TemplateContext;
use crate::error::HubgenResult;

/// Port for file access.
///
/// Implemented by:
/// - `hubgen_adapters::filesystem::LocalFileStore` (production)
/// - `hubgen_adapters::filesystem::MemoryFileStore` (testing)
///
/// Paths handed to the store are already joined with the project root.
/// Every method is a single scoped operation; no handle outlives the call.
#[cfg_attr(test, automock)]
pub trait FileStore: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> HubgenResult<String>;

    /// Create or truncate `path` and write `content`.
    fn write_file(&self, path: &Path, content: &str) -> HubgenResult<()>;

    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> HubgenResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `hubgen_adapters::renderer::HandlebarsRenderer`
///
/// Rendering is a pure function of `(name, context)`: no side effects on the
/// file system, and equal inputs give byte-identical output.
#[cfg_attr(test, automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Fails with `TemplateMissing` for an unknown name and `RenderError`
    /// when the template does not fit the context.
    fn render(&self, name: &str, context: &TemplateContext) -> HubgenResult<String>;

    fn has_template(&self, name: &str) -> bool;

    /// Names of every loaded template, sorted.
    fn template_names(&self) -> Vec<String>;
}

/// Port for the overwrite decision on an existing file.
///
/// Any `Fn(&Path) -> bool` closure is a prompt.
pub trait OverwritePrompt: Send + Sync {
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

impl<F> OverwritePrompt for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn confirm_overwrite(&self, path: &Path) -> bool {
        self(path)
    }
}
