//! Phrasing hints for the standard prompt sections.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Role,
    Input,
    Output,
}

impl SectionKind {
    /// Infer the kind from a heading's title, case-insensitively.
    pub(crate) fn of(title: &str) -> Option<SectionKind> {
        let title = title.to_lowercase();
        if title.contains("role") {
            Some(SectionKind::Role)
        } else if title.contains("output") || title.contains("requirement") {
            Some(SectionKind::Output)
        } else if title.contains("input") {
            Some(SectionKind::Input)
        } else {
            None
        }
    }

    fn cues(self) -> &'static [&'static str] {
        match self {
            SectionKind::Role => &["responsibilit", "task", "goal", "objective", "you will"],
            SectionKind::Input => &["provide", "given", "receive", "include"],
            SectionKind::Output => &["format", "structure", "include", "return", "produce"],
        }
    }

    fn hint(self) -> &'static str {
        match self {
            SectionKind::Role => {
                "consider specifying clear responsibilities or objectives for this role"
            }
            SectionKind::Input => "consider specifying what inputs or data will be provided",
            SectionKind::Output => "consider specifying the expected output format or structure",
        }
    }

    /// The hint to show, or `None` when `content` already has a cue word.
    pub(crate) fn advise(self, content: &str) -> Option<&'static str> {
        let content = content.to_lowercase();
        if self.cues().iter().any(|cue| content.contains(cue)) {
            None
        } else {
            Some(self.hint())
        }
    }
}
