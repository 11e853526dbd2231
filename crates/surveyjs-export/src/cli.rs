use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use crate::cmd::{self, compile::CompileArgs, schema::SchemaArgs, validate::ValidateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "surveyjs-export",
    about = "Export survey definitions as SurveyJS JSON",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a survey definition into a SurveyJS schema
    Compile(CompileArgs),
    /// Check a survey definition for problems the compiler would paper over
    Validate(ValidateArgs),
    /// Print the JSON Schema of the survey definition format
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Compile(args) => cmd::compile::run(&args),
        Commands::Validate(args) => cmd::validate::run(&args),
        Commands::Schema(args) => cmd::schema::run(&args),
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
