//! hubgen core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for hubgen, an
//! incremental scaffolding engine for layered feature/state/data projects.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            hubgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, TemplateService)    │
//! │  FileMaterializer, HubPatcher           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FileStore, TemplateRenderer, Prompt)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hubgen-adapters (Infrastructure)    │
//! │ (LocalFileStore, HandlebarsRenderer)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PageSpec, AnchorMerger, HubFile, ...)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hubgen_core::prelude::*;
//!
//! let service = ScaffoldService::new(renderer, store, prompt);
//! let project = Project::new("./my_app/lib", "my_app");
//! let page = PageSpec::new("Todos").primary("Todo");
//! let report = service.generate(&project, &page, &[EntitySpec::new("Todo")])?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Project, ScaffoldService, TemplateInfo, TemplateService,
        ports::{FileStore, OverwritePrompt, TemplateRenderer},
    };
    pub use crate::domain::{
        EntitySpec, FieldSpec, FileOutcome, FileRole, GenerationReport, ModelFile, PageLayout,
        PageSpec, ProjectLayout, RunState, TemplateContext,
    };
    pub use crate::error::{HubgenError, HubgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
