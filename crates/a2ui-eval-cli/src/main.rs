mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use a2ui_eval::fixture::PromptSet;
use a2ui_eval::matcher::SchemaMatcher;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use crate::report::{check_file, render_text, RunReport};

#[derive(Parser)]
#[command(name = "a2ui-eval", version, about = "Validate A2UI messages produced by a model")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more JSON payload files
    Check(CheckArgs),
    /// List prompts and their matchers from a fixture file
    List(ListArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Payload files (model outputs)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Prompt fixture file (.yaml, .yml or .json)
    #[arg(long)]
    fixtures: Option<PathBuf>,
    /// Only apply prompts whose name starts with this prefix
    #[arg(long, requires = "fixtures")]
    prompt: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args)]
struct ListArgs {
    /// Prompt fixture file (.yaml, .yml or .json)
    #[arg(long)]
    fixtures: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_fixtures(path: &Path) -> Result<PromptSet> {
    PromptSet::load(path).with_context(|| format!("loading fixtures from {}", path.display()))
}

fn cmd_check(args: &CheckArgs, verbose: bool) -> Result<bool> {
    let prompts = args.fixtures.as_deref().map(load_fixtures).transpose()?;

    if let (Some(set), Some(prefix)) = (&prompts, &args.prompt) {
        if set.filter_prefix(prefix).is_empty() {
            bail!("No prompt found with prefix \"{}\".", prefix);
        }
    }

    let reports: Vec<RunReport> = args
        .files
        .iter()
        .flat_map(|file| check_file(file, prompts.as_ref(), args.prompt.as_deref()))
        .collect();

    let failed = reports.iter().filter(|r| !r.passed()).count();
    tracing::info!(runs = reports.len(), failed, "check finished");

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&reports, verbose)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("serializing report")?
        ),
    }
    Ok(failed == 0)
}

fn cmd_list(args: &ListArgs) -> Result<()> {
    let set = load_fixtures(&args.fixtures)?;
    for prompt in &set.prompts {
        if prompt.description.is_empty() {
            println!("{}", prompt.name);
        } else {
            println!("{} - {}", prompt.name, prompt.description);
        }
        for matcher in &prompt.matchers {
            println!("  * {}", matcher.description());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match &cli.command {
        Commands::Check(args) => cmd_check(args, cli.verbose),
        Commands::List(args) => cmd_list(args).map(|()| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
