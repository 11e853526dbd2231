pub mod compile;
pub mod schema;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use surveyjs_schema::SurveyDefinition;

pub(crate) fn load_survey(path: &Path) -> Result<SurveyDefinition> {
    SurveyDefinition::load(path)
        .with_context(|| format!("failed to load survey definition {}", path.display()))
}

pub(crate) fn write_output(out: Option<&Path>, payload: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
            std::fs::write(path, payload)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}
