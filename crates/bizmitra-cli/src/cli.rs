//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BizMitra - billing analytics companion for small businesses
#[derive(Parser)]
#[command(name = "bizmitra")]
#[command(about = "Cash-flow risk forecasts, insights, and alerts from billing history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Billing database path
    #[arg(long, default_value = "bizmitra.db", global = true)]
    pub db: PathBuf,

    /// Risk model artifact
    #[arg(long, default_value = "model/risk_model.json", global = true)]
    pub model: PathBuf,

    /// Fitted scaler artifact (optional; fixed-range normalization is
    /// used when it is absent)
    #[arg(long, default_value = "model/scaler.json", global = true)]
    pub scaler: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the billing database
    Init,

    /// Seed demo billing data
    Seed {
        /// Business to seed (created if missing); all businesses when omitted
        #[arg(long)]
        business: Option<String>,

        /// Bills per business
        #[arg(long, default_value = "250")]
        bills: usize,

        /// Months of history to scatter bills across
        #[arg(long, default_value = "6")]
        months: i64,

        /// RNG seed for reproducible datasets
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Manage businesses
    Businesses {
        #[command(subcommand)]
        action: Option<BusinessesAction>,
    },

    /// Show the feature vector for a business
    Features {
        /// Business id
        #[arg(short, long)]
        business: i64,

        /// Emit JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Show insights (dashboard view) for a business
    Insights {
        /// Business id
        #[arg(short, long)]
        business: i64,

        /// Emit JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Show alerts for a business
    Alerts {
        /// Business id
        #[arg(short, long)]
        business: i64,

        /// Emit JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Ask the guided chat a question
    Chat {
        /// Business id
        #[arg(short, long)]
        business: i64,

        /// Free-text query
        query: String,
    },

    /// Sales reports
    Report {
        /// Business id
        #[arg(short, long)]
        business: i64,

        /// Report period: overview, daily, monthly
        #[arg(short, long, default_value = "overview")]
        period: String,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum BusinessesAction {
    /// List businesses
    List,

    /// Create a business
    Add {
        /// Business name
        #[arg(long)]
        name: String,
    },
}
