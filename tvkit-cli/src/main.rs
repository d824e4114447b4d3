mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod report;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use tracing::{debug, error};

use crate::{
    cli::{Args, Commands},
    commands::CommandExecutor,
    config::AppConfig,
    error::Result,
    logging::init_logging,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let guard = match init_logging(args.verbose, args.quiet, args.paths.logs_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        // flush the file writer before exiting
        drop(guard);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    debug!(paths = ?args.paths, "Resolved directories");

    let executor = CommandExecutor::new(args.paths, config);

    match args.command {
        Commands::Format => executor.format()?,
        Commands::Generate => executor.generate()?,
        Commands::Api => executor.api()?,
        Commands::Validate => executor.validate()?,
        Commands::Test(test_args) => executor.test_streams(&test_args).await?,
        Commands::Readme => executor.readme()?,
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }

    Ok(())
}
