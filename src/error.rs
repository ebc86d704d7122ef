//! Error types for the template engine.
//!
//! Only caller contract violations are errors. Anything derived from document
//! text (bad front-matter, malformed placeholders, missing values) degrades
//! gracefully and shows up in a [`ValidationReport`](crate::ValidationReport)
//! instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    #[error("Invalid required section {heading:?}: {reason}")]
    InvalidSection { heading: String, reason: String },

    #[error("Invalid variable name: {0:?}")]
    InvalidVariableName(String),

    #[error("Invalid generation context: {0}")]
    InvalidContext(String),
}

impl ForgeError {
    pub(crate) fn section(heading: &str, reason: impl Into<String>) -> Self {
        ForgeError::InvalidSection {
            heading: heading.to_string(),
            reason: reason.into(),
        }
    }
}
