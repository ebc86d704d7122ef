//! Template records
//!
//! [`Template`] bundles a title, parsed front-matter and body, and derives the
//! rest (variables, roles, phase, description) on demand. Derived values are
//! never stored, so a body edit can't leave them stale.

use serde::Serialize;

use crate::metadata::{parse_metadata, Metadata};
use crate::placeholders::scan_variables;
use crate::roles::{detect_agent_roles, detect_workflow_phase, AgentRole, WorkflowPhase};
use crate::sections::{preamble, truncate};
use crate::substitution::{substitute, GenerationContext};
use crate::validation::{ValidationReport, Validator};

const DESCRIPTION_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub title: String,
    /// File name the template was read from, used for role and phase detection
    pub file_name: Option<String>,
    pub metadata: Metadata,
    pub body: String,
}

impl Template {
    /// Parse raw template text, splitting off any front-matter.
    pub fn parse(title: impl Into<String>, raw: &str) -> Self {
        let (metadata, body) = parse_metadata(raw);
        Self {
            title: title.into(),
            file_name: None,
            metadata,
            body,
        }
    }

    /// Parse raw text read from `file_name`.
    ///
    /// The title comes from front-matter `name`/`title` when present, otherwise
    /// from the file stem: `developer_story.md` becomes `Developer Story`.
    pub fn from_file_name(file_name: &str, raw: &str) -> Self {
        let mut template = Self::parse(title_from_file_name(file_name), raw);
        if let Some(title) = template
            .metadata
            .text("name")
            .or_else(|| template.metadata.text("title"))
            .filter(|t| !t.is_empty())
        {
            template.title = title.to_string();
        }
        template.file_name = Some(file_name.to_string());
        template
    }

    /// Distinct placeholder names in the body, first-occurrence order.
    pub fn variables(&self) -> Vec<String> {
        scan_variables(&self.body)
    }

    /// Front-matter `description`, otherwise the body's opening paragraph.
    pub fn description(&self) -> String {
        if let Some(text) = self.metadata.text("description").filter(|t| !t.is_empty()) {
            return text.to_string();
        }
        let first_paragraph = preamble(&self.body)
            .split("\n\n")
            .next()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ");
        truncate(&first_paragraph, DESCRIPTION_MAX_CHARS)
    }

    /// Roles from front-matter `roles`/`role`, otherwise detected.
    ///
    /// Unrecognized role names are dropped.
    pub fn roles(&self) -> Vec<AgentRole> {
        let declared: Vec<AgentRole> = ["roles", "role", "agent_role"]
            .iter()
            .flat_map(|key| self.metadata.list(key))
            .flat_map(|entry| entry.split(','))
            .filter_map(|name| name.parse::<AgentRole>().ok())
            .fold(Vec::new(), |mut acc, role| {
                if !acc.contains(&role) {
                    acc.push(role);
                }
                acc
            });
        if !declared.is_empty() {
            return declared;
        }
        detect_agent_roles(&self.body, self.detection_name())
    }

    pub fn role(&self) -> Option<AgentRole> {
        self.roles().into_iter().next()
    }

    /// Phase from front-matter `workflow_phase`/`phase`, otherwise detected.
    pub fn phase(&self) -> Option<WorkflowPhase> {
        ["workflow_phase", "phase"]
            .iter()
            .filter_map(|key| self.metadata.text(key))
            .find_map(|name| name.parse::<WorkflowPhase>().ok())
            .or_else(|| detect_workflow_phase(&self.body, self.detection_name()))
    }

    /// Substitute `context` into the body and validate the result.
    pub fn generate(&self, context: &GenerationContext, validator: &Validator) -> GeneratedPrompt {
        let output = substitute(&self.body, context);
        let report = validator.validate(&output);
        tracing::debug!(
            template = %self.title,
            variables = context.len(),
            compliant = report.is_compliant,
            "generated prompt"
        );
        GeneratedPrompt {
            template: self.title.clone(),
            context: context.clone(),
            output,
            report,
        }
    }

    fn detection_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(&self.title)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = self.role().map(AgentRole::slug).unwrap_or("unassigned");
        let phase = self.phase().map(WorkflowPhase::slug).unwrap_or("unassigned");
        write!(f, "{} ({} - {})", self.title, role, phase)
    }
}

/// Output of one generation: what callers persist alongside the template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPrompt {
    pub template: String,
    pub context: GenerationContext,
    pub output: String,
    pub report: ValidationReport,
}

impl GeneratedPrompt {
    pub fn is_valid(&self) -> bool {
        self.report.is_compliant
    }

    /// `Valid`, or `Invalid (N issues)`.
    pub fn status(&self) -> String {
        if self.is_valid() {
            "Valid".to_string()
        } else {
            format!("Invalid ({} issues)", self.report.issue_count())
        }
    }
}

/// `developer_story.md` → `Developer Story`.
pub fn title_from_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = base.strip_suffix(".md").unwrap_or(base);
    stem.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
