//! Table-driven validator tests
//!
//! Documents come from [`DocumentBuilder`] so each case states only what
//! differs from a compliant prompt.

use forge::testing::assert_report;
use forge::testing::factories::DocumentBuilder;
use forge::{validate, validate_with, ForgeError, ValidationConfig, Validator, Warning};
use rstest::rstest;

#[rstest]
#[case::role("## Your Role")]
#[case::input("## Input")]
#[case::output("## Output Requirements")]
fn test_each_missing_section_is_reported(#[case] heading: &str) {
    let doc = DocumentBuilder::compliant().without(heading).build();
    assert_report(&validate(&doc))
        .named(heading)
        .not_compliant()
        .missing(&[heading])
        .no_unresolved()
        .score(0.75);
}

#[rstest]
#[case(0, 1.0)]
#[case(1, 0.75)]
#[case(2, 0.5)]
#[case(3, 0.25)]
fn test_score_by_missing_count(#[case] drop: usize, #[case] expected: f64) {
    let headings = ["## Your Role", "## Input", "## Output Requirements"];
    let doc = headings[..drop]
        .iter()
        .fold(DocumentBuilder::compliant(), |builder, heading| {
            builder.without(heading)
        })
        .build();
    let report = validate(&doc);
    assert_eq!(report.missing_sections, headings[..drop].to_vec());
    assert!((report.score - expected).abs() < 1e-9);
}

#[rstest]
#[case::double_brace("{{ticket}}", "ticket")]
#[case::padded("{{ ticket }}", "ticket")]
#[case::bracket("[ticket]", "ticket")]
#[case::underscore("{{_draft}}", "_draft")]
fn test_leftover_placeholder_blocks_compliance(#[case] placeholder: &str, #[case] name: &str) {
    let doc = DocumentBuilder::compliant()
        .section("## Notes", format!("See {} for details.", placeholder))
        .build();
    assert_report(&validate(&doc))
        .not_compliant()
        .missing(&[])
        .unresolved(&[name])
        .score_below(1.0);
}

#[rstest]
#[case::unclosed("{{ticket")]
#[case::dashed("{{ticket-id}}")]
#[case::spaced_bracket("[two words]")]
#[case::leading_digit("[1st]")]
fn test_malformed_placeholders_are_text(#[case] text: &str) {
    let doc = DocumentBuilder::compliant()
        .section("## Notes", format!("See {} for details.", text))
        .build();
    assert_report(&validate(&doc)).compliant().score(1.0);
}

#[test]
fn test_more_problems_never_raise_the_score() {
    let clean = validate(&DocumentBuilder::compliant().build()).score;
    let one_var = validate(
        &DocumentBuilder::compliant()
            .section("## Notes", "{{a}}")
            .build(),
    )
    .score;
    let two_vars = validate(
        &DocumentBuilder::compliant()
            .section("## Notes", "{{a}} {{b}}")
            .build(),
    )
    .score;
    let two_vars_missing = validate(
        &DocumentBuilder::compliant()
            .without("## Input")
            .section("## Notes", "{{a}} {{b}}")
            .build(),
    )
    .score;

    assert_eq!(clean, 1.0);
    assert!(one_var < clean);
    assert!(two_vars < one_var);
    assert!(two_vars_missing < two_vars);
}

#[test]
fn test_short_sections_warn_without_failing() {
    let doc = DocumentBuilder::compliant()
        .replace("## Input", "You will be given a ticket.")
        .build();
    assert_report(&validate(&doc))
        .compliant()
        .score(1.0)
        .warns_short("## Input")
        .warning(0, |w| {
            assert_eq!(
                w,
                &Warning::ShortSection {
                    section: "## Input".to_string(),
                    length: 27,
                    minimum: 50,
                }
            )
        });
}

#[test]
fn test_custom_threshold() {
    let doc = DocumentBuilder::compliant()
        .replace("## Input", "You will be given a ticket.")
        .build();
    let config = ValidationConfig::default()
        .with_min_section_length(10)
        .with_min_document_words(40);
    assert_report(&validate_with(&doc, &config).unwrap())
        .compliant()
        .warning_count(0);
}

#[test]
fn test_contract_violations_are_errors() {
    let config = ValidationConfig::default().with_required_sections(["Input"]);
    assert!(matches!(
        Validator::new(config),
        Err(ForgeError::InvalidSection { .. })
    ));
}

#[test]
fn test_report_display() {
    let validator = Validator::new(
        ValidationConfig::default()
            .with_min_section_length(0)
            .with_min_document_words(0)
            .with_section_guidance(false),
    )
    .unwrap();
    let doc = "## Your Role\nYou are {{role}}.\n\n## Output Requirements\nReturn text.\n";
    let report = validator.validate(doc);

    insta::assert_snapshot!(report.to_string().trim_end(), @r"
    Status: not compliant (score 60%)
      error: Missing required section: ## Input
      error: Unresolved variable: role
    ");
}

#[test]
fn test_report_serializes() {
    let doc = DocumentBuilder::compliant().without("## Input").build();
    let json = serde_json::to_value(validate(&doc)).unwrap();
    assert_eq!(json["is_compliant"], false);
    assert_eq!(json["missing_sections"][0], "## Input");
    assert_eq!(json["score"], 0.75);
}
