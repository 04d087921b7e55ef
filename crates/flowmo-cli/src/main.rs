#![forbid(unsafe_code)]

mod cmd;
mod config;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "flowmo: maximum flow over capacitated edge lists",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of `./flowmo.toml` or the user config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute the maximum flow between two nodes",
        long_about = "Read an edge list, compute the maximum flow from --source to --sink with \
                      Dinic's algorithm, and report per-node capacity and flow.",
        after_help = "EXAMPLES:\n    # Solve a network stored in a file\n    flowmo solve net.txt --source a --sink d\n\n    # Read from stdin, include per-edge flow\n    cat net.txt | flowmo solve - -s a -t d --edges\n\n    # Emit machine-readable output\n    flowmo solve net.txt -s a -t d --format json"
    )]
    Solve(cmd::solve::SolveArgs),

    #[command(
        about = "Show per-node capacities without solving",
        after_help = "EXAMPLES:\n    # Summarize a network\n    flowmo inspect net.txt"
    )]
    Inspect(cmd::inspect::InspectArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Install bash completions\n    flowmo completions bash > ~/.local/share/bash-completion/completions/flowmo"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FLOWMO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "flowmo_core=debug,flowmo_cli=debug,info"
        } else {
            "flowmo_core=info,flowmo_cli=info,warn"
        })
    });

    let format = env::var("FLOWMO_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode, report_cfg: &config::ReportConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Solve(ref args) => cmd::solve::run_solve(args, output, report_cfg),
        Commands::Inspect(ref args) => cmd::inspect::run_inspect(args, output, report_cfg),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let working_dir = env::current_dir()?;
    let flag_output = resolve_output_mode(cli.format, cli.json, None);

    let cfg = match config::load_config(cli.config.as_deref(), &working_dir) {
        Ok(cfg) => cfg,
        Err(err) => {
            render_error(flag_output, &CliError::from(&err))?;
            return Ok(ExitCode::FAILURE);
        }
    };
    debug!(?cfg, "configuration loaded");

    let output = resolve_output_mode(cli.format, cli.json, cfg.output.as_deref());
    if cli.verbose {
        info!(?output, "verbose mode enabled");
    }

    match run(cli, output, &cfg.report) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Ok(ExitCode::FAILURE)
        }
    }
}
