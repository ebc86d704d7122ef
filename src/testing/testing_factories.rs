//! Document factories for tests.

use crate::validation::DEFAULT_REQUIRED_SECTIONS;

/// Content long enough and phrased well enough to pass every advisory check
/// for the matching default section.
pub fn default_content(heading: &str) -> &'static str {
    match heading {
        "## Your Role" => {
            "You are an experienced software developer. Your goal is to deliver working, tested code for the team."
        }
        "## Input" => {
            "You will be given a feature request that includes acceptance criteria, constraints and background context."
        }
        "## Output Requirements" => {
            "Return a structured patch containing source code, unit tests and a short summary of every change you made."
        }
        _ => "Additional details that help the agent understand the task and produce a better result.",
    }
}

/// Builds markdown prompt documents one section at a time.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    front_matter: Vec<(String, String)>,
    preamble: Option<String>,
    sections: Vec<(String, String)>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All default required sections with [`default_content`].
    pub fn compliant() -> Self {
        DEFAULT_REQUIRED_SECTIONS
            .iter()
            .fold(Self::new(), |builder, heading| {
                builder.section(*heading, default_content(heading))
            })
    }

    pub fn front_matter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.front_matter.push((key.into(), value.into()));
        self
    }

    pub fn preamble(mut self, text: impl Into<String>) -> Self {
        self.preamble = Some(text.into());
        self
    }

    /// Append a section. `heading` is the full heading line, e.g. `## Notes`.
    pub fn section(mut self, heading: impl Into<String>, content: impl Into<String>) -> Self {
        self.sections.push((heading.into(), content.into()));
        self
    }

    /// Drop the section with this heading.
    pub fn without(mut self, heading: &str) -> Self {
        self.sections.retain(|(h, _)| h != heading);
        self
    }

    /// Replace the content of the section with this heading.
    pub fn replace(mut self, heading: &str, content: impl Into<String>) -> Self {
        let content = content.into();
        for (h, c) in &mut self.sections {
            if h == heading {
                *c = content.clone();
            }
        }
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        if !self.front_matter.is_empty() {
            out.push_str("---\n");
            for (key, value) in &self.front_matter {
                out.push_str(&format!("{}: {}\n", key, value));
            }
            out.push_str("---\n");
        }
        if let Some(preamble) = &self.preamble {
            out.push_str(preamble);
            out.push_str("\n\n");
        }
        for (i, (heading, content)) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(heading);
            out.push('\n');
            out.push_str(content);
            out.push('\n');
        }
        out
    }
}
