//! mlbq - A slim CLI for MLB teams, players, standings and live scores
//!
//! Resolves free-text team and player names against the MLB Stats API and
//! renders standings, season stats, and live scores in the terminal.

mod api;
mod cli;
mod commands;
mod config;
mod directory;
mod output;
mod resolver;
mod score;
mod session;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::RuntimeContext;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = RuntimeContext::new(&cli.global)?;
    ctx.init_logging()?;

    log::debug!("Config loaded from: {:?}", ctx.config_path());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_command(&ctx, cli.command))
}

async fn run_command(ctx: &RuntimeContext, command: Command) -> Result<()> {
    match command {
        Command::Team { query } => commands::team::run(ctx, &query).await,
        Command::Player { query } => commands::player::run(ctx, &query).await,
        Command::Teams { filter } => commands::teams::run(ctx, filter).await,
        Command::Standings { season, leagues } => {
            commands::standings::run(ctx, season.as_deref(), leagues.as_deref()).await
        }
        Command::Stats { player_id, season } => {
            commands::stats::run(ctx, &player_id, season.as_deref()).await
        }
        Command::Scores => commands::scores::run(ctx).await,
        Command::Search => commands::search::run(ctx).await,
        Command::Config { command } => commands::config::run(ctx, command),
        Command::Completions { shell } => commands::completions::run(shell),
    }
}
