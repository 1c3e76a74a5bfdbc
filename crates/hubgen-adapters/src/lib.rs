//! Infrastructure adapters for hubgen.
//!
//! This crate implements the ports defined in `hubgen_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod bundle;
pub mod filesystem;
pub mod prompt;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFileStore, MemoryFileStore};
pub use prompt::FixedAnswer;
pub use renderer::{BundleSource, HandlebarsRenderer};
