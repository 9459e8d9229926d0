//! Ledger CLI - the bank engine in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, demo, logs, persons, status};

/// Ledger - multi-account bank simulator
#[derive(Parser)]
#[command(name = "ledger", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of the registry
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts with balances
    Accounts {
        /// Print each account in full, with its ledger
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List persons and their login state
    Persons {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the scripted session and show every stage
    Demo {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the scripted session and show only the event logs
    Logs {
        /// Show only failed attempts
        #[arg(long)]
        failures: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::init_tracing();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json),
        Commands::Accounts { verbose, json } => accounts::run(verbose, json),
        Commands::Persons { json } => persons::run(json),
        Commands::Demo { json } => demo::run(json),
        Commands::Logs { failures, json } => logs::run(failures, json),
    }
}
