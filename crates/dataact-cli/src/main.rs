//! # dataact CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to the
//! subcommand handlers. Reports go to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dataact_cli::check::{run_check, CheckArgs};
use dataact_cli::rules::{run_rules, RulesArgs};
use dataact_cli::{load_config, EXIT_OPERATIONAL_ERROR};

/// Data Act contract compliance checker.
///
/// Classifies data-sharing contracts as B2C, B2B or B2G and checks them
/// against the Data Act articles that apply to their category.
#[derive(Parser, Debug)]
#[command(name = "dataact", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a checker configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the JSON report is written to.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check contracts and write a compliance report.
    Check(CheckArgs),

    /// List the Data Act rules applied to each contract category.
    Rules(RulesArgs),
}

fn init_logging(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    tracing::debug!("dataact CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        let mut stdout = std::io::stdout().lock();
        match &cli.command {
            Commands::Check(args) => {
                let config = args.apply(config, cli.output_dir.as_deref());
                run_check(args, &config, &mut stdout)
            }
            Commands::Rules(args) => run_rules(args, &config, &mut stdout),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL_ERROR)
        }
    }
}
