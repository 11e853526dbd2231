use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// How compiled elements are grouped in the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// One page per question group.
    #[default]
    Pages,
    /// A single `questions` array.
    Flat,
}

/// Compile switches, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CompileOptions {
    /// Emit `description`/`visibleIf` from relevance expressions.
    pub enable_filters: bool,
    pub layout: Layout,
    /// Prepend a language picker when the survey has several languages.
    pub language_page: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            enable_filters: false,
            layout: Layout::Pages,
            language_page: true,
        }
    }
}

impl CompileOptions {
    pub fn with_filters(mut self, enable: bool) -> Self {
        self.enable_filters = enable;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_language_page(mut self, enable: bool) -> Self {
        self.language_page = enable;
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}
