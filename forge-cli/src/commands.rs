//! Subcommand handlers
//!
//! Each handler prints its result and exits the process on failure, so
//! `main` only dispatches.

use std::path::Path;

use forge::sections::extract_sections;
use forge::{AgentRole, GenerationContext, Template, ValidationReport, Validator, WorkflowPhase};
use forge_config::Loader;
use serde_json::json;

/// Settings that only `render` takes.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Raw `NAME=VALUE` pairs from `--set`
    pub assignments: Vec<String>,
    pub context_file: Option<String>,
    pub validate: bool,
    pub strict: bool,
}

const EXIT_NOT_COMPLIANT: i32 = 2;

pub fn handle_vars_command(path: &str, json: bool) {
    let template = read_template(path);
    let variables = template.variables();
    if json {
        print_json(&json!(variables));
    } else {
        for name in variables {
            println!("{}", name);
        }
    }
}

pub fn handle_inspect_command(path: &str, json: bool) {
    let template = read_template(path);
    let sections = extract_sections(&template.body);

    if json {
        let sections: Vec<_> = sections
            .iter()
            .map(|section| {
                json!({
                    "heading": section.heading,
                    "level": section.level,
                    "summary": section.summary(&template.body),
                    "variables": section.variables(&template.body),
                })
            })
            .collect();
        print_json(&json!({
            "title": template.title,
            "file_name": template.file_name,
            "description": template.description(),
            "roles": template.roles(),
            "phase": template.phase(),
            "variables": template.variables(),
            "metadata": template.metadata,
            "sections": sections,
        }));
        return;
    }

    println!("Title: {}", template.title);
    println!("Description: {}", template.description());
    let roles: Vec<&str> = template
        .roles()
        .into_iter()
        .map(AgentRole::display_name)
        .collect();
    println!("Roles: {}", or_none(&roles.join(", ")));
    println!(
        "Phase: {}",
        template
            .phase()
            .map(WorkflowPhase::display_name)
            .unwrap_or("none")
    );
    println!("Variables: {}", or_none(&template.variables().join(", ")));
    if !template.metadata.is_empty() {
        println!("Metadata:");
        for (key, value) in template.metadata.iter() {
            let shown = value
                .as_text()
                .map(str::to_string)
                .unwrap_or_else(|| value.as_list().join(", "));
            println!("  {}: {}", key, shown);
        }
    }
    if !sections.is_empty() {
        println!("Sections:");
        for section in &sections {
            println!("  {}", section.heading);
            let summary = section.summary(&template.body);
            if !summary.is_empty() {
                println!("    {}", summary);
            }
        }
    }
}

pub fn handle_render_command(path: &str, config: Option<&str>, options: &RenderOptions, json: bool) {
    let template = read_template(path);
    let context = build_context(options);
    let validator = load_validator(config);
    let prompt = template.generate(&context, &validator);

    let missing = context.missing_from(&template.variables());
    if !missing.is_empty() {
        tracing::warn!(missing = %missing.join(", "), "no value supplied for some variables");
    }

    if json {
        print_json(&json!(prompt));
    } else {
        print!("{}", prompt.output);
        if options.validate || options.strict {
            eprint!("{}", prompt.report);
        }
    }
    exit_if_strict(options.strict, &prompt.report);
}

pub fn handle_validate_command(path: &str, config: Option<&str>, strict: bool, json: bool) {
    // Front-matter is not part of the prompt an agent sees
    let template = read_template(path);
    let validator = load_validator(config);
    let report = validator.validate(&template.body);

    if json {
        print_json(&json!(report));
    } else {
        print!("{}", report);
    }
    exit_if_strict(strict, &report);
}

pub fn handle_list_command(dir: &str, json: bool) {
    let entries = std::fs::read_dir(dir).unwrap_or_else(|e| {
        eprintln!("Error reading directory '{}': {}", dir, e);
        std::process::exit(1);
    });
    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    // Unreadable files are reported and skipped
    let templates: Vec<Template> = paths
        .iter()
        .filter_map(|p| match load_template(p) {
            Ok(template) => Some(template),
            Err(e) => {
                eprintln!("Skipping '{}': {}", p.display(), e);
                None
            }
        })
        .collect();
    tracing::debug!(count = templates.len(), dir, "listed templates");

    if json {
        let rows: Vec<_> = templates
            .iter()
            .map(|t| {
                json!({
                    "file_name": t.file_name,
                    "title": t.title,
                    "roles": t.roles(),
                    "phase": t.phase(),
                    "variables": t.variables(),
                })
            })
            .collect();
        print_json(&json!(rows));
    } else {
        for template in &templates {
            println!(
                "{}: {}, {} variables",
                template.file_name.as_deref().unwrap_or_default(),
                template,
                template.variables().len()
            );
        }
    }
}

fn load_template(path: &Path) -> std::io::Result<Template> {
    let raw = std::fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    Ok(Template::from_file_name(file_name, &raw))
}

fn read_template(path: &str) -> Template {
    load_template(Path::new(path)).unwrap_or_else(|e| {
        eprintln!("Error reading '{}': {}", path, e);
        std::process::exit(1);
    })
}

/// `--context` first, then each `--set` in order.
fn build_context(options: &RenderOptions) -> GenerationContext {
    let mut context = match &options.context_file {
        Some(file) => {
            let text = std::fs::read_to_string(file).unwrap_or_else(|e| {
                eprintln!("Error reading context '{}': {}", file, e);
                std::process::exit(1);
            });
            GenerationContext::from_json_str(&text).unwrap_or_else(|e| {
                eprintln!("Error in context '{}': {}", file, e);
                std::process::exit(1);
            })
        }
        None => GenerationContext::new(),
    };

    let mut overrides = GenerationContext::new();
    for assignment in &options.assignments {
        let Some((name, value)) = assignment.split_once('=') else {
            eprintln!("Expected NAME=VALUE, got '{}'", assignment);
            std::process::exit(1);
        };
        overrides.try_insert(name.trim(), value).unwrap_or_else(|e| {
            eprintln!("Error in --set '{}': {}", assignment, e);
            std::process::exit(1);
        });
    }
    context.extend(overrides);
    context
}

fn load_validator(config: Option<&str>) -> Validator {
    let loader = match config {
        Some(file) => Loader::new().with_file(file),
        None => Loader::new().with_project_file("."),
    };
    let settings = loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    settings.validator().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn exit_if_strict(strict: bool, report: &ValidationReport) {
    if strict && !report.is_compliant {
        std::process::exit(EXIT_NOT_COMPLIANT);
    }
}

fn print_json(value: &serde_json::Value) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error formatting JSON: {}", e);
        std::process::exit(1);
    });
    println!("{}", text);
}

fn or_none(text: &str) -> &str {
    if text.is_empty() {
        "none"
    } else {
        text
    }
}
