//! Agent roles and workflow phases
//!
//! Both vocabularies are closed. Free-form strings from front-matter or file
//! names are mapped onto them through [`FromStr`] aliases and the `detect_*`
//! heuristics; anything unrecognized is dropped rather than carried along as an
//! open-ended string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sections::extract_sections;

/// The agent persona a template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Analyst,
    #[serde(rename = "pm")]
    ProductManager,
    Architect,
    UxExpert,
    #[serde(rename = "po")]
    ProductOwner,
    ScrumMaster,
    Developer,
    Qa,
}

impl AgentRole {
    pub const ALL: [AgentRole; 8] = [
        AgentRole::Analyst,
        AgentRole::ProductManager,
        AgentRole::Architect,
        AgentRole::UxExpert,
        AgentRole::ProductOwner,
        AgentRole::ScrumMaster,
        AgentRole::Developer,
        AgentRole::Qa,
    ];

    /// Canonical identifier, as stored by callers.
    pub fn slug(self) -> &'static str {
        match self {
            AgentRole::Analyst => "analyst",
            AgentRole::ProductManager => "pm",
            AgentRole::Architect => "architect",
            AgentRole::UxExpert => "ux_expert",
            AgentRole::ProductOwner => "po",
            AgentRole::ScrumMaster => "scrum_master",
            AgentRole::Developer => "developer",
            AgentRole::Qa => "qa",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgentRole::Analyst => "Business Analyst",
            AgentRole::ProductManager => "Product Manager",
            AgentRole::Architect => "Architect",
            AgentRole::UxExpert => "UX Expert",
            AgentRole::ProductOwner => "Product Owner",
            AgentRole::ScrumMaster => "Scrum Master",
            AgentRole::Developer => "Developer",
            AgentRole::Qa => "QA Engineer",
        }
    }

    /// Lowercase, `_`-joined spellings accepted for this role.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            AgentRole::Analyst => &["analyst", "business_analyst", "ba"],
            AgentRole::ProductManager => &["pm", "product_manager", "manager"],
            AgentRole::Architect => &["architect", "architecture"],
            AgentRole::UxExpert => &["ux_expert", "ux", "designer", "ux_designer"],
            AgentRole::ProductOwner => &["po", "product_owner", "owner"],
            AgentRole::ScrumMaster => &["scrum_master", "sm", "scrum"],
            AgentRole::Developer => &["developer", "dev", "engineer"],
            AgentRole::Qa => &["qa", "tester", "test_architect", "quality"],
        }
    }

    fn from_token(token: &str) -> Option<AgentRole> {
        AgentRole::ALL
            .into_iter()
            .find(|role| role.aliases().contains(&token))
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Where in the delivery workflow a template is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Planning,
    Development,
}

impl WorkflowPhase {
    pub const ALL: [WorkflowPhase; 2] = [WorkflowPhase::Planning, WorkflowPhase::Development];

    pub fn slug(self) -> &'static str {
        match self {
            WorkflowPhase::Planning => "planning",
            WorkflowPhase::Development => "development",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WorkflowPhase::Planning => "Planning",
            WorkflowPhase::Development => "Development",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            WorkflowPhase::Planning => &[
                "planning", "plan", "prd", "brief", "analysis", "research", "requirements",
            ],
            WorkflowPhase::Development => &[
                "development", "dev", "story", "stories", "sprint", "implementation", "implement",
                "code", "review",
            ],
        }
    }

    fn from_token(token: &str) -> Option<WorkflowPhase> {
        WorkflowPhase::ALL
            .into_iter()
            .find(|phase| phase.aliases().contains(&token))
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string names no known role or phase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Lowercase and join words with `_` so `Scrum Master`, `scrum-master` and
/// `scrum_master` compare equal.
fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl FromStr for AgentRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentRole::from_token(&normalize(s)).ok_or_else(|| UnknownVariant {
            kind: "agent role",
            value: s.to_string(),
        })
    }
}

impl FromStr for WorkflowPhase {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowPhase::from_token(&normalize(s)).ok_or_else(|| UnknownVariant {
            kind: "workflow phase",
            value: s.to_string(),
        })
    }
}

/// Split a file name (extension dropped) or prose into lowercase word tokens.
fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn file_stem(file_name: &str) -> &str {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    }
}

/// Scan tokens for known spellings, including two-word ones like `scrum master`.
fn find_all<T: PartialEq + Copy>(words: &[String], lookup: impl Fn(&str) -> Option<T>) -> Vec<T> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let pair = words.get(i + 1).map(|next| format!("{}_{}", words[i], next));
        if let Some(hit) = pair.as_deref().and_then(&lookup) {
            if !found.contains(&hit) {
                found.push(hit);
            }
            i += 2;
            continue;
        }
        if let Some(hit) = lookup(&words[i]) {
            if !found.contains(&hit) {
                found.push(hit);
            }
        }
        i += 1;
    }
    found
}

/// Text that describes who the agent is: the role section if there is one,
/// otherwise the first heading's title.
fn role_text(content: &str) -> String {
    let sections = extract_sections(content);
    sections
        .iter()
        .find(|s| s.title.to_lowercase().contains("role"))
        .map(|s| s.body(content).to_string())
        .or_else(|| sections.first().map(|s| s.title.clone()))
        .unwrap_or_default()
}

/// Every role named by the file name, then by the template's role text, in
/// order of first mention.
pub fn detect_agent_roles(content: &str, file_name: &str) -> Vec<AgentRole> {
    let mut roles = find_all(&tokens(file_stem(file_name)), AgentRole::from_token);
    for role in find_all(&tokens(&role_text(content)), AgentRole::from_token) {
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}

/// The primary role: the first one [`detect_agent_roles`] finds.
pub fn detect_agent_role(content: &str, file_name: &str) -> Option<AgentRole> {
    detect_agent_roles(content, file_name).into_iter().next()
}

/// The phase named by the file name, otherwise by the first heading's title.
pub fn detect_workflow_phase(content: &str, file_name: &str) -> Option<WorkflowPhase> {
    find_all(&tokens(file_stem(file_name)), WorkflowPhase::from_token)
        .into_iter()
        .next()
        .or_else(|| {
            let title = extract_sections(content)
                .into_iter()
                .next()
                .map(|s| s.title)
                .unwrap_or_default();
            find_all(&tokens(&title), WorkflowPhase::from_token)
                .into_iter()
                .next()
        })
}
