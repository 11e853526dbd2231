use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use surveyjs_schema::{Severity, ValidationReport, validate_survey};

use super::load_survey;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Survey definition (JSON)
    #[arg(value_name = "SURVEY")]
    pub survey: PathBuf,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ValidateArgs) -> Result<()> {
    let survey = load_survey(&args.survey)?;
    let report = validate_survey(&survey);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_text(&report));
    }

    if !report.valid {
        bail!(
            "survey-validate: {} error(s) in {}",
            report.errors().count(),
            args.survey.display()
        );
    }
    Ok(())
}

pub fn render_text(report: &ValidationReport) -> String {
    let mut lines = Vec::new();
    for issue in &report.issues {
        let label = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        lines.push(format!(
            "{label}[{}] {}: {}",
            issue.code, issue.path, issue.message
        ));
    }
    if report.valid {
        lines.push(format!(
            "ok ({} warning(s))",
            report.warnings().count()
        ));
    }
    lines.join("\n")
}
