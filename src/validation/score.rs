//! Compliance scoring.
//!
//! `score = section_factor * variable_factor` where
//!
//! ```text
//! section_factor  = 1 - missing / (required + 1)
//! variable_factor = 1 / (1 + unresolved / 4)
//! ```
//!
//! Both factors are `1.0` at zero and strictly decrease with their count
//! without ever reaching zero, so the product stays in `(0, 1]`, is `1.0` only
//! for a clean document, and drops with every extra missing section or
//! unresolved variable.

/// Weight of a single unresolved variable relative to one missing section.
const UNRESOLVED_SCALE: f64 = 4.0;

pub fn compliance_score(required: usize, missing: usize, unresolved: usize) -> f64 {
    let missing = missing.min(required);
    let section_factor = 1.0 - missing as f64 / (required as f64 + 1.0);
    let variable_factor = 1.0 / (1.0 + unresolved as f64 / UNRESOLVED_SCALE);
    (section_factor * variable_factor).clamp(0.0, 1.0)
}
