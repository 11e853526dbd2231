use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use schemars::schema_for;
use surveyjs_schema::{CompileOptions, SurveyDefinition};

use super::write_output;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Print the schema of the compile options file instead
    #[arg(long)]
    pub options: bool,
    #[arg(long = "out", short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn run(args: &SchemaArgs) -> Result<()> {
    let schema = if args.options {
        schema_for!(CompileOptions)
    } else {
        schema_for!(SurveyDefinition)
    };
    let payload = serde_json::to_string_pretty(&schema)?;
    write_output(args.out.as_deref(), &payload)
}
