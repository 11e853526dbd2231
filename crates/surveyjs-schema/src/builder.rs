//! Survey to document driver.

use tracing::{debug, trace};

use crate::document::{
    Choice, DisplayText, DocumentBody, Element, ElementKind, Page, SchemaDocument,
};
use crate::element::{ElementContext, map_question};
use crate::expr::translate_relevance;
use crate::i18n;
use crate::model::{QuestionGroup, SurveyDefinition};
use crate::options::{CompileOptions, Layout};
use crate::sanitize::sanitize_text;
use crate::tokens::TokenTable;

/// Name of the synthetic language picker element and of its page.
pub const LANGUAGE_ELEMENT: &str = "language";
const LANGUAGE_TITLE_KEY: &str = "language.title";

/// Compiles one survey. Pure and deterministic; never fails.
pub fn compile(survey: &SurveyDefinition, options: &CompileOptions) -> SchemaDocument {
    let ctx = ElementContext::new(survey, options);
    let picker = (options.language_page && ctx.languages.len() > 1)
        .then(|| language_element(&ctx));

    let body = match options.layout {
        Layout::Pages => {
            let mut pages = Vec::with_capacity(survey.groups.len() + 1);
            if let Some(element) = picker {
                pages.push(Page {
                    name: LANGUAGE_ELEMENT.into(),
                    elements: vec![element],
                });
            }
            pages.extend(
                survey
                    .groups
                    .iter()
                    .map(|group| compile_group(survey.id, group, &ctx)),
            );
            DocumentBody::Pages(pages)
        }
        Layout::Flat => {
            let mut elements = Vec::new();
            elements.extend(picker);
            for group in &survey.groups {
                elements.extend(compile_group(survey.id, group, &ctx).elements);
            }
            DocumentBody::Questions(elements)
        }
    };

    SchemaDocument {
        locale: survey.language.clone(),
        default_locale: survey.language.clone(),
        body,
    }
}

/// Compiles one group into a page.
///
/// The group's token table is complete before any of its expressions is
/// translated.
pub fn compile_group(survey_id: u64, group: &QuestionGroup, ctx: &ElementContext) -> Page {
    let table = ctx
        .enable_filters
        .then(|| TokenTable::build(survey_id, group));
    if let Some(table) = &table {
        debug!(group = group.id, entries = table.len(), "token table built");
    }

    let elements = group
        .base_questions()
        .map(|question| {
            let relevance = table
                .as_ref()
                .and_then(|table| translate_relevance(&question.relevance, table));
            trace!(question = %question.name, relevance = ?relevance, "mapping question");
            map_question(question, relevance.as_deref(), ctx)
        })
        .collect();

    Page {
        name: sanitize_text(&group.name),
        elements,
    }
}

/// Required radio group offering every supported language.
pub fn language_element(ctx: &ElementContext) -> Element {
    let choices = ctx
        .languages
        .iter()
        .map(|language| Choice {
            value: (*language).into(),
            text: DisplayText::Plain((*language).to_string()),
        })
        .collect();
    Element {
        name: LANGUAGE_ELEMENT.into(),
        title: i18n::localized(LANGUAGE_TITLE_KEY, ctx.default_language, &ctx.languages),
        is_required: true,
        description: None,
        visible_if: None,
        hide_number: true,
        kind: ElementKind::Radiogroup {
            has_other: false,
            choices,
        },
    }
}
