//! Compliance validation
//!
//! Checks a generated prompt (after substitution) against a [`ValidationConfig`]:
//!
//! 1. Every required heading must appear as a whole line. Absent ones are
//!    listed in configuration order.
//! 2. Any placeholder still in the text is an unresolved variable. The
//!    validator rescans the output instead of consulting the context, so it
//!    works on any text regardless of where it came from.
//! 3. Present required sections with thin content, thin documents and
//!    sections lacking the usual phrasing produce [`Warning`]s.
//! 4. The [score](score::compliance_score) folds the two blocking counts into
//!    `[0, 1]`.
//!
//! Only the first two steps decide [`ValidationReport::is_compliant`].

mod config;
mod guidance;
mod report;
pub mod score;

use serde::Serialize;

use crate::error::ForgeError;
use crate::placeholders::scan_variables;
use crate::sections::{extract_sections, find_section};

pub use config::{
    ValidationConfig, DEFAULT_MIN_DOCUMENT_WORDS, DEFAULT_MIN_SECTION_LENGTH,
    DEFAULT_REQUIRED_SECTIONS,
};
pub use report::{ValidationReport, Warning};

use guidance::SectionKind;

/// A checked [`ValidationConfig`] ready to validate documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    config: ValidationConfig,
}

/// Result of checking one section's content in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub section: String,
    pub is_valid: bool,
    pub unresolved_variables: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl Validator {
    /// Fails when the configuration is a caller mistake, e.g. a heading
    /// without a `#` prefix.
    pub fn new(config: ValidationConfig) -> Result<Self, ForgeError> {
        config.check()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn validate(&self, text: &str) -> ValidationReport {
        let config = &self.config;
        let sections = extract_sections(text);

        let mut missing_sections = Vec::new();
        let mut warnings = Vec::new();
        for heading in &config.required_sections {
            match find_section(&sections, heading) {
                Some(section) => {
                    warnings.extend(self.section_warnings(heading, &section.title, section.body(text)))
                }
                None => missing_sections.push(heading.clone()),
            }
        }

        let words = text.split_whitespace().count();
        if config.min_document_words > 0 && words < config.min_document_words {
            warnings.push(Warning::ShortDocument {
                words,
                minimum: config.min_document_words,
            });
        }

        let unresolved_variables = scan_variables(text);
        let score = score::compliance_score(
            config.required_sections.len(),
            missing_sections.len(),
            unresolved_variables.len(),
        );
        let is_compliant = missing_sections.is_empty() && unresolved_variables.is_empty();

        tracing::debug!(
            is_compliant,
            missing = missing_sections.len(),
            unresolved = unresolved_variables.len(),
            warnings = warnings.len(),
            score,
            "validated document"
        );

        ValidationReport {
            is_compliant,
            missing_sections,
            unresolved_variables,
            warnings,
            score,
        }
    }

    /// Check one section's content as it is being written.
    ///
    /// `section` is the heading title (`Your Role`) or full heading line.
    pub fn validate_section(&self, section: &str, content: &str) -> SectionReport {
        let title = section.trim_start_matches('#').trim();
        let unresolved_variables = scan_variables(content);
        SectionReport {
            section: section.to_string(),
            is_valid: unresolved_variables.is_empty(),
            unresolved_variables,
            warnings: self.section_warnings(section, title, content.trim()),
        }
    }

    fn section_warnings(&self, label: &str, title: &str, content: &str) -> Vec<Warning> {
        let mut warnings = Vec::new();
        let length = content.chars().count();
        if self.config.min_section_length > 0 && length < self.config.min_section_length {
            warnings.push(Warning::ShortSection {
                section: label.to_string(),
                length,
                minimum: self.config.min_section_length,
            });
        }
        if self.config.section_guidance {
            if let Some(hint) = SectionKind::of(title).and_then(|kind| kind.advise(content)) {
                warnings.push(Warning::MissingGuidance {
                    section: label.to_string(),
                    hint: hint.to_string(),
                });
            }
        }
        warnings
    }
}

/// Validate with the default configuration.
pub fn validate(text: &str) -> ValidationReport {
    Validator::default().validate(text)
}

/// Validate with explicit settings.
pub fn validate_with(text: &str, config: &ValidationConfig) -> Result<ValidationReport, ForgeError> {
    Ok(Validator::new(config.clone())?.validate(text))
}
