// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for hubgen.
//!
//! Pure logic only. Rendering and file access are reached through the ports
//! defined in the application layer.
//!
//! - **No I/O**: merging works on strings, layout works on relative paths
//! - **Immutable inputs**: the page/entity model is never mutated by a run
//! - **Deterministic**: the same model always yields the same paths, contexts
//!   and patches
//!
pub mod context;
pub mod error;
pub mod hub;
pub mod layout;
pub mod model;
pub mod patch;
pub mod report;

mod validation;

pub use context::{ContextValue, TemplateContext};
pub use error::{DomainError, ErrorCategory};
pub use hub::{HubFile, Slot};
pub use layout::{ProjectLayout, SKELETON_DIRS, StateFile};
pub use model::{
    CrudCapabilities, EntitySpec, FeatureToggles, FieldSpec, ModelFile, PageLayout, PageSpec,
    UniqueField,
};
pub use patch::{Anchor, AnchorMerger, AnchorPatch, MergeOutcome};
pub use report::{FileOutcome, FileRole, GenerationReport, ReportEntry, RunPhase, RunState};
pub use validation::DomainValidator;
