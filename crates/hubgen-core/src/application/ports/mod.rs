//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hubgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileStore`: file reads and writes under the project root
//!   - `TemplateRenderer`: named template + context to text
//!   - `OverwritePrompt`: the "overwrite this file?" decision
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{FileStore, OverwritePrompt, TemplateRenderer};
