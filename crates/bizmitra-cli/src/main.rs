//! BizMitra CLI - billing analytics companion
//!
//! Usage:
//!   bizmitra init                      Initialize the billing database
//!   bizmitra seed                      Seed demo billing data
//!   bizmitra insights --business 1     Dashboard insights for a business
//!   bizmitra alerts --business 1       Threshold alerts for a business
//!   bizmitra chat --business 1 "..."   Ask the guided chat

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Seed {
            business,
            bills,
            months,
            seed,
        } => commands::cmd_seed(&cli.db, business.as_deref(), bills, months, seed),
        Commands::Businesses { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(BusinessesAction::List) => commands::cmd_businesses_list(&db),
                Some(BusinessesAction::Add { name }) => commands::cmd_businesses_add(&db, &name),
            }
        }
        Commands::Features { business, json } => {
            commands::cmd_features(&cli.db, &cli.model, &cli.scaler, business, json)
        }
        Commands::Insights { business, json } => {
            commands::cmd_insights(&cli.db, &cli.model, &cli.scaler, business, json)
        }
        Commands::Alerts { business, json } => {
            commands::cmd_alerts(&cli.db, &cli.model, &cli.scaler, business, json)
        }
        Commands::Chat { business, query } => {
            commands::cmd_chat(&cli.db, &cli.model, &cli.scaler, business, &query)
        }
        Commands::Report { business, period } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_report(&db, business, &period)
        }
        Commands::Status => commands::cmd_status(&cli.db),
    }
}
