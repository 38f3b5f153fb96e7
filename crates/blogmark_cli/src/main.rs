use std::process::ExitCode;

use blogmark_cli::{commands, repl, Cli, Command};
use blogmark_engine::{FetchSettings, Pipeline};
use blogmark_logging::{level_from_verbosity, LogDestination};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let destination = match cli.log_file {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    if !blogmark_logging::initialize(destination, level_from_verbosity(cli.verbose)) {
        eprintln!("Warning: logging could not be initialized");
    }

    let pipeline = Pipeline::from_settings(FetchSettings::default())?;
    match cli.command {
        Command::Fetch(args) => Ok(commands::execute_fetch(args, &pipeline).await),
        Command::Bulk(args) => commands::execute_bulk(args, &pipeline).await,
        Command::Interactive => {
            repl::run_repl(&pipeline).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
