use serde_json::json;

use surveyjs_schema::{Severity, SurveyDefinition, validate_survey};

fn survey(value: serde_json::Value) -> SurveyDefinition {
    serde_json::from_value(value).expect("survey")
}

#[test]
fn fixture_surveys_are_valid() {
    for raw in [
        include_str!("../tests/fixtures/single_choice.json"),
        include_str!("../tests/fixtures/multilingual.json"),
    ] {
        let report = validate_survey(&SurveyDefinition::from_json_str(raw).expect("deserialize"));
        assert!(report.valid, "unexpected issues: {:?}", report.issues);
        assert_eq!(report.errors().count(), 0);
    }
}

#[test]
fn duplicate_names_across_groups_are_errors() {
    let report = validate_survey(&survey(json!({
        "id": 1,
        "language": "en",
        "groups": [
            { "id": 1, "name": "A", "questions": [
                { "id": 1, "name": "Q1", "type": "T", "translations": { "en": "One" } }
            ]},
            { "id": 2, "name": "B", "questions": [
                { "id": 2, "name": "Q1", "type": "T", "translations": { "en": "Again" } }
            ]}
        ]
    })));
    assert!(!report.valid);
    assert!(report.has_code("duplicate_name"));
}

#[test]
fn repeated_subquestion_names_under_different_parents_are_fine() {
    let report = validate_survey(&survey(json!({
        "id": 1,
        "language": "en",
        "groups": [{ "id": 1, "name": "A", "questions": [
            { "id": 1, "name": "M1", "type": "M", "translations": { "en": "One" },
              "subquestions": [{ "id": 3, "parent_id": 1, "name": "SQ001", "type": "T", "translations": { "en": "x" } }] },
            { "id": 2, "name": "M2", "type": "M", "translations": { "en": "Two" },
              "subquestions": [{ "id": 4, "parent_id": 2, "name": "SQ001", "type": "T", "translations": { "en": "y" } }] }
        ]}]
    })));
    assert!(report.valid, "unexpected issues: {:?}", report.issues);
}

#[test]
fn missing_default_language_text_is_reported_per_entity() {
    let report = validate_survey(&survey(json!({
        "id": 1,
        "language": "en",
        "languages": ["en", "de"],
        "groups": [{ "id": 1, "name": "A", "questions": [
            { "id": 1, "name": "Q1", "type": "L", "translations": { "de": "Frage" },
              "answers": [{ "code": "1", "translations": { "en": null, "de": "Ja" } }] }
        ]}]
    })));
    let paths = report
        .errors()
        .filter(|issue| issue.code == "missing_default_text")
        .map(|issue| issue.path.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        paths,
        vec!["/groups/1/questions/Q1", "/groups/1/questions/Q1/answers/1"]
    );
}

#[test]
fn orphan_subquestion_rows_are_errors() {
    let report = validate_survey(&survey(json!({
        "id": 1,
        "language": "en",
        "groups": [{ "id": 1, "name": "A", "questions": [
            { "id": 1, "name": "Q1", "type": "T", "translations": { "en": "One" } },
            { "id": 5, "parent_id": 99, "name": "SQ001", "type": "T", "translations": { "en": "Row" } }
        ]}]
    })));
    assert!(report.has_code("orphan_subquestion"));
    assert!(!report.valid);
}

#[test]
fn token_collisions_are_warnings() {
    let report = validate_survey(&survey(json!({
        "id": 1,
        "language": "en",
        "groups": [{ "id": 1, "name": "A", "questions": [
            { "id": 1, "name": "Q1", "type": "M", "translations": { "en": "One" },
              "subquestions": [{ "id": 2, "parent_id": 1, "name": "A", "type": "T", "translations": { "en": "a" } }] },
            { "id": 3, "name": "Q1_A", "type": "T", "translations": { "en": "Two" } }
        ]}]
    })));
    assert!(report.valid);
    let warning = report.warnings().next().expect("collision warning");
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.code, "token_collision");
    assert_eq!(warning.path, "/groups/1/tokens/Q1_A");
}

#[test]
fn duplicate_languages_are_warnings() {
    let report = validate_survey(&survey(json!({
        "id": 1,
        "language": "en",
        "languages": ["en", "de", "de"],
        "groups": []
    })));
    assert!(report.valid);
    assert!(report.has_code("duplicate_language"));
}
