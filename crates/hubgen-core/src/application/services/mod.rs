//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a page" or "initialise a project".

pub mod hub_patcher;
pub mod materializer;
pub mod scaffold_service;
pub mod template_service;

pub use hub_patcher::{HubPatchResult, HubPatcher};
pub use materializer::FileMaterializer;
pub use scaffold_service::{Project, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};
