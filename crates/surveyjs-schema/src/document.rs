//! Output document in the shape the SurveyJS renderer loads.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Returned instead of an error when the document cannot be encoded.
pub const EMPTY_DOCUMENT: &str = "{}";

/// Top-level compiled document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    pub locale: String,
    #[serde(rename = "defaultLocale")]
    pub default_locale: String,
    #[serde(flatten)]
    pub body: DocumentBody,
}

/// Either a page list or a single flat list of elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentBody {
    Pages(Vec<Page>),
    Questions(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub name: String,
    pub elements: Vec<Element>,
}

/// One form control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    pub title: LocalizedText,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "visibleIf", skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<String>,
    #[serde(rename = "hideNumber", skip_serializing_if = "is_false")]
    pub hide_number: bool,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Type-specific part of an element, tagged by the renderer's `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Radiogroup {
        #[serde(rename = "hasOther", skip_serializing_if = "is_false")]
        has_other: bool,
        choices: Vec<Choice>,
    },
    Dropdown {
        choices: Vec<Choice>,
    },
    Text {
        #[serde(rename = "inputType", skip_serializing_if = "Option::is_none")]
        input_type: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        validators: Vec<Validator>,
    },
    Matrix {
        #[serde(rename = "columnMinWidth")]
        column_min_width: String,
        columns: Vec<MatrixColumn>,
        rows: Vec<MatrixRow>,
    },
    Checkbox {
        choices: Vec<Choice>,
    },
}

impl ElementKind {
    /// Renderer type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Radiogroup { .. } => "radiogroup",
            ElementKind::Dropdown { .. } => "dropdown",
            ElementKind::Text { .. } => "text",
            ElementKind::Matrix { .. } => "matrix",
            ElementKind::Checkbox { .. } => "checkbox",
        }
    }

    pub fn plain_text() -> Self {
        ElementKind::Text {
            input_type: None,
            validators: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: Value,
    pub text: DisplayText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validator {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Validator {
    pub fn numeric() -> Self {
        Self {
            kind: "numeric".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixColumn {
    pub value: String,
    pub text: LocalizedText,
    #[serde(rename = "maxWidth")]
    pub max_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub value: String,
    pub text: LocalizedText,
}

/// Choice label: a bare string or a per-language text object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayText {
    Plain(String),
    Localized(LocalizedText),
}

/// Multi-language text: `{"default": .., "<lang>": ..}`.
///
/// Serialized with `default` first, then languages in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub default: String,
    pub translations: Vec<(String, String)>,
}

impl LocalizedText {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            translations: Vec::new(),
        }
    }

    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.push((language.into(), text.into()));
        self
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, text)| text.as_str())
    }
}

impl Serialize for LocalizedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.translations.len() + 1))?;
        map.serialize_entry("default", &self.default)?;
        for (language, text) in &self.translations {
            map.serialize_entry(language, text)?;
        }
        map.end()
    }
}

impl SchemaDocument {
    pub fn pages(&self) -> &[Page] {
        match &self.body {
            DocumentBody::Pages(pages) => pages,
            DocumentBody::Questions(_) => &[],
        }
    }

    /// Every element in document order, whatever the layout.
    pub fn elements(&self) -> Vec<&Element> {
        match &self.body {
            DocumentBody::Pages(pages) => pages.iter().flat_map(|page| &page.elements).collect(),
            DocumentBody::Questions(elements) => elements.iter().collect(),
        }
    }

    /// Compact JSON; `{}` if encoding fails.
    pub fn to_json(&self) -> String {
        encode_or_empty(self, serde_json::to_string)
    }

    /// Indented JSON; `{}` if encoding fails.
    pub fn to_json_pretty(&self) -> String {
        encode_or_empty(self, serde_json::to_string_pretty)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            warn!(error = %err, "failed to encode schema document");
            Value::Object(Default::default())
        })
    }
}

fn encode_or_empty<T, F>(value: &T, encode: F) -> String
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> serde_json::Result<String>,
{
    encode(value).unwrap_or_else(|err| {
        warn!(error = %err, "failed to encode schema document");
        EMPTY_DOCUMENT.to_string()
    })
}

fn is_false(flag: &bool) -> bool {
    !*flag
}
