use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn vars_lists_in_first_use_order() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("vars").arg(fixture_path("developer_story.md"));
    cmd.assert()
        .success()
        .stdout("language\nteam_name\nstory_id\n");
}

#[test]
fn vars_as_json() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("vars")
        .arg(fixture_path("analyst_brief.md"))
        .arg("--format")
        .arg("json");
    cmd.assert().success().stdout(
        predicate::str::contains("\"project_name\"").and(predicate::str::contains("\"market\"")),
    );
}

#[test]
fn inspect_shows_metadata_and_sections() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("inspect").arg(fixture_path("developer_story.md"));
    let output_pred = predicate::str::contains("Title: Developer Story Implementation")
        .and(predicate::str::contains("Roles: Developer, QA Engineer"))
        .and(predicate::str::contains("Phase: Development"))
        .and(predicate::str::contains("  ## Output Requirements"));
    cmd.assert().success().stdout(output_pred);
}

#[test]
fn render_fills_every_placeholder() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("render")
        .arg(fixture_path("developer_story.md"))
        .args(["--set", "language=Rust"])
        .args(["--set", "team_name=Payments"])
        .args(["--set", "story_id=PAY-42"])
        .arg("--strict");
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("senior Rust developer on the Payments team")
                .and(predicate::str::contains("{{").not()),
        )
        .stderr(predicate::str::contains("Status: compliant (score 100%)"));
}

#[test]
fn render_with_context_file() {
    let context = temp_file(
        ".json",
        r#"{"language": "Go", "team_name": "Ledger", "story_id": 7}"#,
    );
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("render")
        .arg(fixture_path("developer_story.md"))
        .arg("--context")
        .arg(context.path())
        .args(["--set", "language=Rust"]);
    cmd.assert().success().stdout(
        predicate::str::contains("senior Rust developer on the Ledger team")
            .and(predicate::str::contains("the story 7 which")),
    );
}

#[test]
fn strict_render_with_missing_value_exits_two() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("render")
        .arg(fixture_path("developer_story.md"))
        .args(["--set", "language=Rust", "--set", "team_name=Payments"])
        .arg("--strict");
    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("[story_id]"))
        .stderr(predicate::str::contains("Unresolved variable: story_id"));
}

#[test]
fn render_json_includes_report() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("render")
        .arg(fixture_path("analyst_brief.md"))
        .args(["--set", "project_name=Atlas", "--set", "market=logistics"])
        .args(["--format", "json"]);
    cmd.assert().success().stdout(
        predicate::str::contains("\"is_compliant\": false")
            .and(predicate::str::contains("## Output Requirements"))
            .and(predicate::str::contains("\"score\": 0.75")),
    );
}

#[test]
fn bad_variable_name_is_an_error() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("render")
        .arg(fixture_path("developer_story.md"))
        .args(["--set", "team-name=Payments"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid variable name"));
}

#[test]
fn validate_reports_missing_sections() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("validate").arg(fixture_path("analyst_brief.md"));
    cmd.assert().success().stdout(
        predicate::str::contains("Status: not compliant")
            .and(predicate::str::contains("error: Missing required section: ## Output Requirements"))
            .and(predicate::str::contains("error: Unresolved variable: project_name")),
    );

    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("validate")
        .arg(fixture_path("analyst_brief.md"))
        .arg("--strict");
    cmd.assert().code(2);
}

#[test]
fn validate_with_config_file() {
    let config = temp_file(
        ".toml",
        "[validation]\nrequired_sections = [\"# Project Brief\", \"## Your Role\"]\nmin_section_length = 0\nmin_document_words = 0\nsection_guidance = false\n",
    );
    let prompt = temp_file(
        ".md",
        "# Project Brief\n\n## Your Role\nYou are a business analyst.\n",
    );
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("validate")
        .arg(prompt.path())
        .arg("--config")
        .arg(config.path())
        .arg("--strict");
    cmd.assert()
        .success()
        .stdout("Status: compliant (score 100%)\n");
}

#[test]
fn invalid_config_is_an_error() {
    let config = temp_file(".toml", "[validation]\nrequired_sections = [\"Your Role\"]\n");
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("validate")
        .arg(fixture_path("developer_story.md"))
        .arg("--config")
        .arg(config.path());
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn list_describes_each_template() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("list").arg(fixture_path(""));
    cmd.assert().success().stdout(
        predicate::str::contains("analyst_brief.md: Analyst Brief (analyst - planning), 2 variables")
            .and(predicate::str::contains(
                "developer_story.md: Developer Story Implementation (developer - development), 3 variables",
            )),
    );
}

#[test]
fn missing_file_is_an_error() {
    let mut cmd = cargo_bin_cmd!("forge");
    cmd.arg("vars").arg(fixture_path("no_such_template.md"));
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Error reading"));
}
