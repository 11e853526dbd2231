//! Variable token table for one question group.
//!
//! A relevance expression may name a question by its plain name, by its
//! positional identifier (`12X34X56`), or name one of its subquestions or
//! answers as `PARENT_CHILD`. The table maps each of those spellings to the
//! bracketed token understood by the form renderer. Entries are applied in
//! table order, so a variable must always come before every variable that is
//! a substring of it: `Q10` before `Q1`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::model::{Question, QuestionGroup, composite_id};

/// What a table entry stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenOrigin {
    Question { name: String },
    Subquestion { parent: String, name: String },
    Answer { parent: String, code: String },
}

impl fmt::Display for TokenOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenOrigin::Question { name } => write!(f, "question '{name}'"),
            TokenOrigin::Subquestion { parent, name } => {
                write!(f, "subquestion '{name}' of '{parent}'")
            }
            TokenOrigin::Answer { parent, code } => write!(f, "answer '{code}' of '{parent}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub variable: String,
    pub token: String,
    pub origin: TokenOrigin,
}

/// Two different sources spelled the same variable; the first one was kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCollision {
    pub variable: String,
    pub kept: TokenOrigin,
    pub dropped: TokenOrigin,
}

/// Ordered `variable -> {token}` mapping for one group's expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    entries: Vec<TokenEntry>,
    collisions: Vec<TokenCollision>,
}

impl TokenTable {
    /// Builds the table from the base questions of `group`.
    pub fn build(survey_id: u64, group: &QuestionGroup) -> Self {
        let questions = group.base_questions().collect::<Vec<_>>();
        Self::from_questions(survey_id, group.id, &questions)
    }

    /// Builds the table from an explicit list of base questions.
    pub fn from_questions(survey_id: u64, group_id: u64, questions: &[&Question]) -> Self {
        let mut builder = TableBuilder::default();
        let composites = questions
            .iter()
            .map(|question| {
                (
                    composite_id(survey_id, group_id, question.id),
                    question.name.as_str(),
                )
            })
            .collect::<Vec<_>>();

        for (question, (own_composite, _)) in questions.iter().zip(&composites) {
            let own_name = question.name.as_str();

            let longer_names = longer_overlaps(
                own_name,
                questions.iter().map(|other| (other.name.as_str(), other.name.as_str())),
            );
            for (name, _) in longer_names {
                builder.insert(name, name, question_origin(name));
            }

            for subquestion in &question.subquestions {
                let tag = child_tag(own_name, &subquestion.name);
                let origin = TokenOrigin::Subquestion {
                    parent: own_name.to_string(),
                    name: subquestion.name.clone(),
                };
                builder.insert(&tag, &tag, origin.clone());
                let sub_composite = composite_id(survey_id, group_id, subquestion.id);
                builder.insert(&sub_composite, &tag, origin);
            }

            for answer in &question.answers {
                let tag = child_tag(own_name, &answer.code);
                let origin = TokenOrigin::Answer {
                    parent: own_name.to_string(),
                    code: answer.code.clone(),
                };
                builder.insert(&tag, &tag, origin);
            }

            let longer_composites = longer_overlaps(
                own_composite,
                composites
                    .iter()
                    .map(|(composite, owner)| (composite.as_str(), *owner)),
            );
            for (composite, owner) in longer_composites {
                builder.insert(composite, owner, question_origin(owner));
            }

            builder.insert(own_name, own_name, question_origin(own_name));
            builder.insert(own_composite, own_name, question_origin(own_name));
        }

        builder.finish()
    }

    pub fn entries(&self) -> &[TokenEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bracketed token for `variable`, if present.
    pub fn token(&self, variable: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.variable == variable)
            .map(|entry| entry.token.as_str())
    }

    /// Table position of `variable`, if present.
    pub fn position(&self, variable: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.variable == variable)
    }

    pub fn collisions(&self) -> &[TokenCollision] {
        &self.collisions
    }
}

/// Wraps a variable name in the renderer's token brackets.
pub fn bracket(name: &str) -> String {
    format!("{{{name}}}")
}

/// Tag naming a subquestion or answer of `parent`, e.g. `Q1_SQ001`.
pub fn child_tag(parent: &str, child: &str) -> String {
    format!("{parent}_{child}")
}

#[derive(Default)]
struct TableBuilder {
    entries: Vec<TokenEntry>,
    origins: BTreeMap<String, TokenOrigin>,
    collisions: Vec<TokenCollision>,
}

impl TableBuilder {
    /// First writer wins; a later, different origin is recorded as a collision.
    fn insert(&mut self, variable: &str, target: &str, origin: TokenOrigin) {
        if variable.is_empty() {
            return;
        }
        if let Some(kept) = self.origins.get(variable) {
            if *kept != origin {
                debug!(variable, kept = %kept, dropped = %origin, "token table collision");
                self.collisions.push(TokenCollision {
                    variable: variable.to_string(),
                    kept: kept.clone(),
                    dropped: origin,
                });
            }
            return;
        }
        self.origins.insert(variable.to_string(), origin.clone());
        self.entries.push(TokenEntry {
            variable: variable.to_string(),
            token: bracket(target),
            origin,
        });
    }

    fn finish(self) -> TokenTable {
        TokenTable {
            entries: order_superstrings_first(self.entries),
            collisions: self.collisions,
        }
    }
}

fn question_origin(name: &str) -> TokenOrigin {
    TokenOrigin::Question {
        name: name.to_string(),
    }
}

/// Candidates that strictly contain `needle`, longest first, ties in source order.
fn longer_overlaps<'a>(
    needle: &str,
    candidates: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<(&'a str, &'a str)> {
    let mut found = candidates
        .filter(|(candidate, _)| candidate.len() > needle.len() && candidate.contains(needle))
        .collect::<Vec<_>>();
    found.sort_by(|left, right| right.0.len().cmp(&left.0.len()));
    found
}

/// Moves each entry in front of the first earlier entry whose variable it
/// contains. Tables already in a valid order come back unchanged.
///
/// Invariant: every entry precedes all entries whose variable is a proper
/// substring of its own.
fn order_superstrings_first(entries: Vec<TokenEntry>) -> Vec<TokenEntry> {
    let mut ordered: Vec<TokenEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let slot = ordered
            .iter()
            .position(|placed| {
                placed.variable.len() < entry.variable.len()
                    && entry.variable.contains(placed.variable.as_str())
            })
            .unwrap_or(ordered.len());
        ordered.insert(slot, entry);
    }
    ordered
}
