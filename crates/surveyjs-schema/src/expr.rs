//! Rewrites relevance expressions into the renderer's `visibleIf` syntax.

use crate::model::question::ALWAYS_RELEVANT;
use crate::tokens::TokenTable;

/// Literal rewrites applied to the whole expression, in this order.
pub const OPERATOR_SUBSTITUTIONS: [(&str, &str); 7] = [
    ("==", "="),
    ("!==", "!="),
    (".NAOK", ""),
    ("&&", "and"),
    ("!is_empty(", "("),
    ("is_empty(", "("),
    ("\"", "'"),
];

/// Translates a raw relevance expression.
///
/// Returns `None` when the expression is the constant `1`, meaning the
/// question is always shown.
pub fn translate_relevance(raw: &str, table: &TokenTable) -> Option<String> {
    if raw == ALWAYS_RELEVANT {
        return None;
    }
    let rewritten = substitute_operators(raw);
    Some(substitute_variables(&rewritten, table))
}

pub fn substitute_operators(raw: &str) -> String {
    OPERATOR_SUBSTITUTIONS
        .iter()
        .fold(raw.to_string(), |expr, (from, to)| expr.replace(from, to))
}

/// Applies the table entries in order. Text already inside `{...}`, whether
/// written by the author or produced by an earlier entry, is never rescanned.
pub fn substitute_variables(expr: &str, table: &TokenTable) -> String {
    let mut segments = split_bracketed(expr);
    for entry in table.iter() {
        segments = segments
            .into_iter()
            .flat_map(|segment| match segment {
                Segment::Text(text) => replace_in_text(&text, &entry.variable, &entry.token),
                token @ Segment::Token(_) => vec![token],
            })
            .collect();
    }
    segments.into_iter().map(Segment::into_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Token(String),
}

impl Segment {
    fn into_string(self) -> String {
        match self {
            Segment::Text(text) | Segment::Token(text) => text,
        }
    }
}

fn split_bracketed(expr: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = expr;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let close = open + close;
        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }
        segments.push(Segment::Token(rest[open..=close].to_string()));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }
    segments
}

fn replace_in_text(text: &str, variable: &str, token: &str) -> Vec<Segment> {
    if variable.is_empty() || !text.contains(variable) {
        return vec![Segment::Text(text.to_string())];
    }
    let mut out = Vec::new();
    let mut last = 0;
    for (start, matched) in text.match_indices(variable) {
        if start > last {
            out.push(Segment::Text(text[last..start].to_string()));
        }
        out.push(Segment::Token(token.to_string()));
        last = start + matched.len();
    }
    if last < text.len() {
        out.push(Segment::Text(text[last..].to_string()));
    }
    out
}
