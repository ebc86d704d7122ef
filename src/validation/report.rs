//! Validation results.

use std::fmt;

use serde::Serialize;

/// An advisory finding. Warnings never affect compliance or score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A required section is present but its content is thin
    ShortSection {
        section: String,
        length: usize,
        minimum: usize,
    },
    /// The document as a whole has few words
    ShortDocument { words: usize, minimum: usize },
    /// A section is missing the phrasing its kind usually carries
    MissingGuidance { section: String, hint: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ShortSection {
                section,
                length,
                minimum,
            } => write!(
                f,
                "Section '{}' is short ({} characters, expected at least {})",
                section, length, minimum
            ),
            Warning::ShortDocument { words, minimum } => write!(
                f,
                "Document is relatively short ({} words, expected at least {})",
                words, minimum
            ),
            Warning::MissingGuidance { section, hint } => {
                write!(f, "Section '{}': {}", section, hint)
            }
        }
    }
}

/// Outcome of checking one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// No missing sections and no unresolved variables
    pub is_compliant: bool,
    /// Required headings not found, in configuration order
    pub missing_sections: Vec<String>,
    /// Placeholders still present, first-occurrence order
    pub unresolved_variables: Vec<String>,
    pub warnings: Vec<Warning>,
    /// In `[0.0, 1.0]`; exactly `1.0` when compliant
    pub score: f64,
}

impl ValidationReport {
    /// Blocking problems as human-readable lines.
    pub fn issues(&self) -> Vec<String> {
        self.missing_sections
            .iter()
            .map(|s| format!("Missing required section: {}", s))
            .chain(
                self.unresolved_variables
                    .iter()
                    .map(|v| format!("Unresolved variable: {}", v)),
            )
            .collect()
    }

    pub fn issue_count(&self) -> usize {
        self.missing_sections.len() + self.unresolved_variables.len()
    }

    /// Score as a whole percentage. Only a clean report shows 100.
    pub fn percent(&self) -> u8 {
        let percent = (self.score * 100.0).round().clamp(0.0, 100.0) as u8;
        if self.score < 1.0 {
            percent.min(99)
        } else {
            percent
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_compliant {
            "compliant"
        } else {
            "not compliant"
        };
        writeln!(f, "Status: {} (score {}%)", verdict, self.percent())?;
        for issue in self.issues() {
            writeln!(f, "  error: {}", issue)?;
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {}", warning)?;
        }
        Ok(())
    }
}
