use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::error::{ExportError, Result};

/// One page worth of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionGroup {
    pub id: u64,
    pub name: String,
    /// Every question row of the group in stored order, subquestion rows included.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionGroup {
    /// Questions without a parent, in stored order.
    pub fn base_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| question.is_base())
    }
}

/// Fully resolved survey handed over by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveyDefinition {
    pub id: u64,
    /// Default display language.
    pub language: String,
    /// Supported languages in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub groups: Vec<QuestionGroup>,
}

impl SurveyDefinition {
    /// Supported languages without duplicates; the default language is
    /// prepended when the list omits it.
    pub fn supported_languages(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.languages.len() + 1);
        if !self.languages.iter().any(|lang| lang == &self.language) {
            out.push(&self.language);
        }
        for language in &self.languages {
            if !out.contains(&language.as_str()) {
                out.push(language);
            }
        }
        out
    }

    pub fn is_multilingual(&self) -> bool {
        self.supported_languages().len() > 1
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
