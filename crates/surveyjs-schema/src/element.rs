//! Question to schema element mapping.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use tracing::{debug, warn};

use crate::document::{
    Choice, DisplayText, Element, ElementKind, LocalizedText, MatrixColumn, MatrixRow, Validator,
};
use crate::model::question::lookup;
use crate::model::{Answer, Question, QuestionType, SurveyDefinition, Translations};
use crate::options::CompileOptions;
use crate::sanitize::sanitize_text;

pub const MATRIX_COLUMN_MIN_WIDTH: &str = "200px";
pub const MATRIX_COLUMN_MAX_WIDTH: &str = "1%";

static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric literal regex")
});

/// Survey-wide settings shared by every element of one compilation.
#[derive(Debug, Clone)]
pub struct ElementContext<'a> {
    pub default_language: &'a str,
    pub languages: Vec<&'a str>,
    pub enable_filters: bool,
}

impl<'a> ElementContext<'a> {
    pub fn new(survey: &'a SurveyDefinition, options: &CompileOptions) -> Self {
        Self {
            default_language: &survey.language,
            languages: survey.supported_languages(),
            enable_filters: options.enable_filters,
        }
    }

    /// Sanitized per-language text; languages without a non-null entry are left out.
    pub fn localize(&self, translations: &Translations, subject: &str) -> LocalizedText {
        let default = match lookup(translations, self.default_language) {
            Some(text) => sanitize_text(text),
            None => {
                warn!(
                    subject,
                    language = self.default_language,
                    "missing default-language text"
                );
                String::new()
            }
        };
        let mut localized = LocalizedText::new(default);
        for language in &self.languages {
            if let Some(text) = lookup(translations, language) {
                localized = localized.with(*language, sanitize_text(text));
            }
        }
        localized
    }
}

/// Builds the element for one base question.
///
/// `relevance` is the already translated expression; it only reaches the
/// element when filters are enabled.
pub fn map_question(question: &Question, relevance: Option<&str>, ctx: &ElementContext) -> Element {
    let condition = relevance
        .filter(|_| ctx.enable_filters)
        .map(str::to_string);
    Element {
        name: question.name.clone(),
        title: ctx.localize(&question.translations, &question.name),
        is_required: question.mandatory,
        description: condition.clone(),
        visible_if: condition,
        hide_number: false,
        kind: element_kind(question, ctx),
    }
}

fn element_kind(question: &Question, ctx: &ElementContext) -> ElementKind {
    match &question.kind {
        QuestionType::ListRadio | QuestionType::ListRadioFlexible => single_choice(question, ctx),
        QuestionType::ListDropdown => ElementKind::Dropdown {
            choices: answer_choices(question, ctx),
        },
        QuestionType::Numerical => numeric(),
        QuestionType::ArrayFlexibleRow => matrix(question, ctx),
        QuestionType::MultipleChoice => multiple_choice(question, ctx),
        QuestionType::Other(code) => {
            debug!(question = %question.name, code = %code, "no dedicated element, using text");
            ElementKind::plain_text()
        }
    }
}

fn single_choice(question: &Question, ctx: &ElementContext) -> ElementKind {
    ElementKind::Radiogroup {
        has_other: true,
        choices: answer_choices(question, ctx),
    }
}

fn numeric() -> ElementKind {
    ElementKind::Text {
        input_type: Some("number".into()),
        validators: vec![Validator::numeric()],
    }
}

fn matrix(question: &Question, ctx: &ElementContext) -> ElementKind {
    let columns = question
        .answers
        .iter()
        .map(|answer| MatrixColumn {
            value: answer.code.clone(),
            text: answer_text(question, answer, ctx),
            max_width: MATRIX_COLUMN_MAX_WIDTH.into(),
        })
        .collect();
    let rows = question
        .subquestions
        .iter()
        .map(|row| MatrixRow {
            value: row.name.clone(),
            text: ctx.localize(&row.translations, &row.name),
        })
        .collect();
    ElementKind::Matrix {
        column_min_width: MATRIX_COLUMN_MIN_WIDTH.into(),
        columns,
        rows,
    }
}

fn multiple_choice(question: &Question, ctx: &ElementContext) -> ElementKind {
    let choices = question
        .subquestions
        .iter()
        .map(|option| Choice {
            value: Value::from(1),
            text: DisplayText::Localized(ctx.localize(&option.translations, &option.name)),
        })
        .collect();
    ElementKind::Checkbox { choices }
}

fn answer_choices(question: &Question, ctx: &ElementContext) -> Vec<Choice> {
    question
        .answers
        .iter()
        .map(|answer| Choice {
            value: choice_value(&answer.code),
            text: DisplayText::Localized(answer_text(question, answer, ctx)),
        })
        .collect()
}

fn answer_text(question: &Question, answer: &Answer, ctx: &ElementContext) -> LocalizedText {
    let subject = format!("{}_{}", question.name, answer.code);
    ctx.localize(&answer.translations, &subject)
}

/// Answer code as a JSON number when it is a whole number, else as a string.
///
/// `"3"` and `"03"` become `3`; `"3a"` and `"2.5"` stay strings.
pub fn choice_value(code: &str) -> Value {
    whole_number(code)
        .map(|number| Value::Number(Number::from(number)))
        .unwrap_or_else(|| Value::String(code.to_string()))
}

fn whole_number(code: &str) -> Option<i64> {
    let trimmed = code.trim();
    if !NUMERIC.is_match(trimmed) {
        return None;
    }
    if let Ok(exact) = trimmed.parse::<i64>() {
        return Some(exact);
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    let truncated = parsed.trunc();
    // i64 casts saturate, so the round trip also rejects out-of-range values.
    let as_int = truncated as i64;
    (as_int as f64 == parsed).then_some(as_int)
}
