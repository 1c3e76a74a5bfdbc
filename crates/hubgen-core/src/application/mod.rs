//! Application layer for hubgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer drives the domain layer through the ports. Merge
//! rules, paths and contexts live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    FileMaterializer, HubPatcher, Project, ScaffoldService, TemplateInfo, TemplateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileStore, OverwritePrompt, TemplateRenderer};

pub use error::ApplicationError;
