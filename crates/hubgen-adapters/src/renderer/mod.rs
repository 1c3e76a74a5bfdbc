//! Template renderer adapters.

mod handlebars_renderer;

pub use handlebars_renderer::{BundleSource, HandlebarsRenderer};
