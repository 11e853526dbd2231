use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use surveyjs_schema::{CompileOptions, Layout, compile};
use tracing::info;

use super::{load_survey, write_output};

#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// Survey definition (JSON)
    #[arg(value_name = "SURVEY")]
    pub survey: PathBuf,
    /// Write the schema here instead of stdout
    #[arg(long = "out", short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
    /// Compile options file (TOML)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Emit visibleIf conditions from relevance expressions
    #[arg(long = "enable-filters")]
    pub enable_filters: bool,
    /// Emit a single question list instead of pages
    #[arg(long)]
    pub flat: bool,
    /// Never add the language selection element
    #[arg(long = "no-language-page")]
    pub no_language_page: bool,
}

pub fn run(args: &CompileArgs) -> Result<()> {
    let options = resolve_options(args)?;
    let survey = load_survey(&args.survey)?;
    let document = compile(&survey, &options);
    info!(
        survey = survey.id,
        elements = document.elements().len(),
        "compiled survey"
    );

    let payload = if args.pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    };
    write_output(args.out.as_deref(), &payload)
}

/// Options file first, then command-line switches on top.
pub fn resolve_options(args: &CompileArgs) -> Result<CompileOptions> {
    let mut options = match &args.config {
        Some(path) => CompileOptions::load(path)
            .with_context(|| format!("failed to load compile options {}", path.display()))?,
        None => CompileOptions::default(),
    };
    if args.enable_filters {
        options.enable_filters = true;
    }
    if args.flat {
        options.layout = Layout::Flat;
    }
    if args.no_language_page {
        options.language_page = false;
    }
    Ok(options)
}
