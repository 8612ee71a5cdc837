//! AgriLink CLI - crop-issue reporting and triage from the terminal
//!
//! Each profile keeps its own API URL and signed-in session, so one machine
//! can act as a farmer, an extension employee or an admin.

mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::ai::run_ask;
use crate::commands::auth_cmd::run_auth;
use crate::commands::common::AppContext;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::locations::run_locations;
use crate::commands::menu::run_menu;
use crate::commands::notifications::run_notifications;
use crate::commands::products::run_products;
use crate::commands::reports::run_reports;
use crate::commands::stats::run_stats;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "agrilink=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CliError::Io)?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Config { command } => run_config(command, profile, cli.api_url)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
        command => {
            let mut ctx = AppContext::open(profile, cli.api_url)?;
            dispatch(command, &mut ctx).await?;
        }
    }

    Ok(())
}

async fn dispatch(command: Commands, ctx: &mut AppContext) -> Result<(), CliError> {
    match command {
        Commands::Auth { command } => run_auth(command, ctx).await,
        Commands::Menu { json } => run_menu(ctx, json),
        Commands::Reports { command } => run_reports(command, ctx).await,
        Commands::Notifications { command } => run_notifications(command, ctx).await,
        Commands::Locations { command } => run_locations(command, ctx).await,
        Commands::Products { command } => run_products(command, ctx).await,
        Commands::Stats { command } => run_stats(command, ctx).await,
        Commands::Ask { message } => run_ask(&message, ctx).await,
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
