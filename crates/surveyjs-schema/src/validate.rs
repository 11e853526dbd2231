//! Checks on survey definitions before compiling.
//!
//! The compiler itself assumes these hold and falls back silently when they
//! do not; the report makes such inputs visible.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionGroup, SurveyDefinition};
use crate::tokens::TokenTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: String,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

pub fn validate_survey(survey: &SurveyDefinition) -> ValidationReport {
    let mut issues = Vec::new();

    check_languages(survey, &mut issues);

    let mut seen_names: BTreeMap<&str, String> = BTreeMap::new();
    for group in &survey.groups {
        let group_path = format!("/groups/{}", group.id);
        check_orphans(group, &group_path, &mut issues);

        for question in group.base_questions() {
            let path = format!("{group_path}/questions/{}", question.name);
            check_name(question, &path, &mut seen_names, &mut issues);
            check_default_text(
                question.text(&survey.language).is_some(),
                &path,
                &survey.language,
                &mut issues,
            );

            let mut seen_rows = BTreeMap::new();
            for subquestion in &question.subquestions {
                let sub_path = format!("{path}/subquestions/{}", subquestion.name);
                check_name(subquestion, &sub_path, &mut seen_rows, &mut issues);
                check_default_text(
                    subquestion.text(&survey.language).is_some(),
                    &sub_path,
                    &survey.language,
                    &mut issues,
                );
            }

            for answer in &question.answers {
                let answer_path = format!("{path}/answers/{}", answer.code);
                check_default_text(
                    answer.text(&survey.language).is_some(),
                    &answer_path,
                    &survey.language,
                    &mut issues,
                );
            }
        }

        let table = TokenTable::build(survey.id, group);
        for collision in table.collisions() {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                code: "token_collision".into(),
                path: format!("{group_path}/tokens/{}", collision.variable),
                message: format!(
                    "'{}' names both {} and {}; expressions resolve it to the former",
                    collision.variable, collision.kept, collision.dropped
                ),
            });
        }
    }

    ValidationReport {
        valid: !issues.iter().any(|issue| issue.severity == Severity::Error),
        issues,
    }
}

fn check_languages(survey: &SurveyDefinition, issues: &mut Vec<ValidationIssue>) {
    if survey.language.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "missing_language".into(),
            path: "/language".into(),
            message: "survey has no default language".into(),
        });
    }
    let mut seen = BTreeSet::new();
    for language in &survey.languages {
        if !seen.insert(language.as_str()) {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                code: "duplicate_language".into(),
                path: format!("/languages/{language}"),
                message: format!("language '{language}' is listed more than once"),
            });
        }
    }
}

fn check_orphans(group: &QuestionGroup, group_path: &str, issues: &mut Vec<ValidationIssue>) {
    let base_ids = group
        .base_questions()
        .map(|question| question.id)
        .collect::<BTreeSet<_>>();
    for row in group.questions.iter().filter(|question| !question.is_base()) {
        if let Some(parent) = row.parent_id
            && !base_ids.contains(&parent)
        {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                code: "orphan_subquestion".into(),
                path: format!("{group_path}/questions/{}", row.name),
                message: format!(
                    "subquestion '{}' refers to parent {parent} which is not in the group",
                    row.name
                ),
            });
        }
    }
}

fn check_name<'a>(
    question: &'a Question,
    path: &str,
    seen: &mut BTreeMap<&'a str, String>,
    issues: &mut Vec<ValidationIssue>,
) {
    if question.name.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "empty_name".into(),
            path: path.to_string(),
            message: format!("question {} has no name", question.id),
        });
        return;
    }
    if let Some(first) = seen.get(question.name.as_str()) {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "duplicate_name".into(),
            path: path.to_string(),
            message: format!("name '{}' is already used at {first}", question.name),
        });
        return;
    }
    seen.insert(question.name.as_str(), path.to_string());
}

fn check_default_text(
    present: bool,
    path: &str,
    language: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if !present {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            code: "missing_default_text".into(),
            path: path.to_string(),
            message: format!("no text for default language '{language}'"),
        });
    }
}
