use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-language display text keyed by language code. Entries may be absent or null.
pub type Translations = BTreeMap<String, Option<String>>;

/// Relevance value meaning "always visible".
pub const ALWAYS_RELEVANT: &str = "1";

/// Question type codes understood by the compiler.
///
/// Codes are the single characters used by the survey storage. Unknown codes
/// are kept verbatim in [`QuestionType::Other`] and compile to plain text inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// `L`: single choice rendered as a radio list.
    ListRadio,
    /// `Z`: flexible single choice radio list.
    ListRadioFlexible,
    /// `!`: single choice rendered as a dropdown.
    ListDropdown,
    /// `N`: numeric input.
    Numerical,
    /// `F`: array of rows sharing one answer scale.
    ArrayFlexibleRow,
    /// `M`: multiple choice, one checkbox per subquestion.
    MultipleChoice,
    Other(String),
}

impl QuestionType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "L" => QuestionType::ListRadio,
            "Z" => QuestionType::ListRadioFlexible,
            "!" => QuestionType::ListDropdown,
            "N" => QuestionType::Numerical,
            "F" => QuestionType::ArrayFlexibleRow,
            "M" => QuestionType::MultipleChoice,
            other => QuestionType::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            QuestionType::ListRadio => "L",
            QuestionType::ListRadioFlexible => "Z",
            QuestionType::ListDropdown => "!",
            QuestionType::Numerical => "N",
            QuestionType::ArrayFlexibleRow => "F",
            QuestionType::MultipleChoice => "M",
            QuestionType::Other(code) => code,
        }
    }
}

impl From<String> for QuestionType {
    fn from(code: String) -> Self {
        QuestionType::from_code(&code)
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.code().to_string()
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One answer option of a list or matrix question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
    pub code: String,
    #[serde(default)]
    pub translations: Translations,
}

/// A question row as loaded from survey storage.
///
/// Subquestions are questions themselves; they carry `parent_id` and are
/// nested under their parent in `subquestions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    pub name: String,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub kind: QuestionType,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default = "always_relevant")]
    pub relevance: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subquestions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub translations: Translations,
}

impl Question {
    pub fn is_base(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Display text for `language`, skipping null entries.
    pub fn text(&self, language: &str) -> Option<&str> {
        lookup(&self.translations, language)
    }
}

impl Answer {
    pub fn text(&self, language: &str) -> Option<&str> {
        lookup(&self.translations, language)
    }
}

pub(crate) fn lookup<'a>(translations: &'a Translations, language: &str) -> Option<&'a str> {
    translations
        .get(language)
        .and_then(|text| text.as_deref())
}

fn always_relevant() -> String {
    ALWAYS_RELEVANT.to_string()
}
