//! CLI for inspecting staking parameters, validating stake inputs and classifying delegations.

mod cli;
mod config;
mod handlers;
mod input;

use anyhow::Result;
use clap::Parser;
use staking_common::logging::{self, LoggerConfig};

use crate::{
    cli::Commands,
    handlers::{classify, params, validate},
};

fn main() -> Result<()> {
    logging::init(LoggerConfig::with_base_name("staking-cli").with_stderr());

    let cli = cli::Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::SelectVersion(args) => params::handle_select_version(args),
        Commands::Window(args) => params::handle_window(args),
        Commands::ValidateStake(args) => validate::handle_validate_stake(args, &cfg),
        Commands::ValidateUnbond(args) => validate::handle_validate_unbond(args, &cfg),
        Commands::ValidateLockTime(args) => validate::handle_validate_lock_time(args),
        Commands::Classify(args) => classify::handle_classify(args, &cfg),
    }
}
