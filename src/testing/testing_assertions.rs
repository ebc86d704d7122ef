//! Fluent assertions over [`ValidationReport`].

use crate::validation::{ValidationReport, Warning};

pub fn assert_report(report: &ValidationReport) -> ReportAssertion<'_> {
    ReportAssertion {
        report,
        context: "report".to_string(),
    }
}

pub struct ReportAssertion<'a> {
    pub(crate) report: &'a ValidationReport,
    pub(crate) context: String,
}

impl<'a> ReportAssertion<'a> {
    /// Prefix failure messages with `context`, e.g. a fixture name.
    pub fn named(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn compliant(self) -> Self {
        assert!(
            self.report.is_compliant,
            "{}: Expected a compliant report, found issues {:?}",
            self.context,
            self.report.issues()
        );
        self
    }

    pub fn not_compliant(self) -> Self {
        assert!(
            !self.report.is_compliant,
            "{}: Expected a non-compliant report",
            self.context
        );
        self
    }

    pub fn missing(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.report.missing_sections, expected,
            "{}: Unexpected missing sections",
            self.context
        );
        self
    }

    pub fn unresolved(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.report.unresolved_variables, expected,
            "{}: Unexpected unresolved variables",
            self.context
        );
        self
    }

    pub fn no_unresolved(self) -> Self {
        self.unresolved(&[])
    }

    pub fn score(self, expected: f64) -> Self {
        assert!(
            (self.report.score - expected).abs() < 1e-9,
            "{}: Expected score {}, found {}",
            self.context,
            expected,
            self.report.score
        );
        self
    }

    pub fn score_below(self, bound: f64) -> Self {
        assert!(
            self.report.score < bound,
            "{}: Expected score below {}, found {}",
            self.context,
            bound,
            self.report.score
        );
        self
    }

    pub fn warning_count(self, expected: usize) -> Self {
        let actual = self.report.warnings.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} warnings, found {}: {:?}",
            self.context, expected, actual, self.report.warnings
        );
        self
    }

    pub fn warning<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(&'a Warning),
    {
        assert!(
            index < self.report.warnings.len(),
            "{}: Warning index {} out of bounds (report has {} warnings)",
            self.context,
            index,
            self.report.warnings.len()
        );
        assertion(&self.report.warnings[index]);
        self
    }

    /// At least one warning about `section` being short.
    pub fn warns_short(self, section: &str) -> Self {
        let found = self.report.warnings.iter().any(|w| {
            matches!(w, Warning::ShortSection { section: s, .. } if s == section)
        });
        assert!(
            found,
            "{}: Expected a short-section warning for {:?}, found {:?}",
            self.context, section, self.report.warnings
        );
        self
    }
}
