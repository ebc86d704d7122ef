//! # forge
//!
//! A prompt template engine. A template is markdown with optional front-matter
//! and placeholders; the engine fills the placeholders and checks the result
//! against a compliance policy.
//!
//! The four entry points, in pipeline order:
//!
//! ```text
//! raw text ──parse_metadata──▶ (Metadata, body)
//!     body ──scan_variables──▶ [name, ...]            what inputs are needed
//!     body ──substitute(ctx)─▶ output                 one pass, unknowns kept
//!   output ──validate────────▶ ValidationReport       sections, leftovers, score
//! ```
//!
//! Everything is synchronous and pure: no I/O, no caches, no global settings.
//! Validator settings travel as a [`ValidationConfig`] value.
//!
//! Malformed input never fails. Bad front-matter means no metadata, a broken
//! placeholder is plain text, a missing value is an unresolved variable in the
//! report. Only caller mistakes (such as an invalid required heading) are
//! [`ForgeError`]s.
//!
//! For test helpers, see the [testing module](testing).

pub mod error;
pub mod metadata;
pub mod placeholders;
pub mod roles;
pub mod sections;
pub mod substitution;
pub mod template;
pub mod testing;
pub mod validation;

pub use error::ForgeError;
pub use metadata::{parse_metadata, Metadata, MetadataValue};
pub use placeholders::{scan_placeholders, scan_variables, Placeholder, PlaceholderSyntax};
pub use roles::{AgentRole, WorkflowPhase};
pub use sections::{extract_sections, Section};
pub use substitution::{substitute, GenerationContext};
pub use template::{GeneratedPrompt, Template};
pub use validation::{
    validate, validate_with, SectionReport, ValidationConfig, ValidationReport, Validator, Warning,
};
