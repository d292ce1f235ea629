use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use csvql::{run_query, AstFormat, CliError, Config, OutputFormat, QueryOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "csvql")]
#[command(
    about = "Query CSV files with SQL. SELECT, FROM, WHERE, and LIMIT are supported.",
    long_about = None
)]
struct Args {
    /// Query to run, e.g. "SELECT name FROM users WHERE age = '25'"
    query: String,

    /// Print the parsed clauses before executing
    #[arg(long)]
    ast: bool,

    /// Format of the --ast dump
    #[arg(long, value_enum, default_value_t = AstFormat::Text)]
    ast_format: AstFormat,

    /// Directory holding <table>.csv files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file (defaults to ./csvql.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            let code = err
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let mut config = Config::load(&cwd, args.config.as_deref())?;

    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!(
        config = ?args.config,
        data_dir = %config.data_dir.display(),
        format = ?config.output.format,
        "configuration loaded"
    );

    let options = QueryOptions {
        print_ast: args.ast,
        ast_format: args.ast_format,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_query(&args.query, &config, &options, &mut out)?;
    out.flush()?;
    Ok(())
}
