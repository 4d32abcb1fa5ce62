//! qrl-explorer CLI entry point.

use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

#[derive(Parser)]
#[command(name = "qrl-explorer", version)]
#[command(about = "Decode and project QRL ledger records", long_about = None)]
struct Cli {
    /// Config file (defaults to ./qrl-explorer.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "qrl_explorer_projector=debug"
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Reject addresses with a bad checksum
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.apply_overrides(cli.pretty, cli.strict);

    logging::init(cli.log_level.as_deref(), config.log_level.as_deref());

    if let Err(e) = commands::run(cli.command, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
