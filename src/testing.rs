//! Testing utilities for templates and validation reports
//!
//! Two tools, meant to be used together:
//!
//! 1. **[DocumentBuilder](factories::DocumentBuilder)** builds prompt documents
//!    section by section, so tests state which sections exist instead of
//!    pasting long markdown literals.
//! 2. **[assert_report](fn@assert_report)** checks a [`ValidationReport`]
//!    through a fluent API that names the failing field.
//!
//! ```rust-example
//! use forge::testing::{assert_report, factories::DocumentBuilder};
//!
//! let doc = DocumentBuilder::compliant().without("## Input").build();
//! assert_report(&forge::validate(&doc))
//!     .not_compliant()
//!     .missing(&["## Input"])
//!     .no_unresolved()
//!     .score_below(1.0);
//! ```
//!
//! [`ValidationReport`]: crate::ValidationReport

mod testing_assertions;
mod testing_factories;

pub use testing_assertions::{assert_report, ReportAssertion};

// Public submodule path: crate::testing::factories
pub mod factories {
    pub use super::testing_factories::*;
}
