//! SplitPay CLI: the main entry point.
//!
//! Commands:
//! - `onboard` : Write a default config file
//! - `status`  : Show the effective configuration
//! - `tiers`   : Load and list the rule set
//! - `quote`   : Compute the repayment schedule and legal text for a total

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "splitpay",
    about = "SplitPay — revolving-credit repayment schedules",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Show the effective configuration
    Status,

    /// Load the rule documents and list the resolved tiers
    Tiers,

    /// Compute the schedule and legal text for a purchase total
    Quote {
        /// Purchase total in EUR
        #[arg(short, long, allow_negative_numbers = true)]
        total: f64,

        /// Language override (es, en, de)
        #[arg(short, long)]
        lang: Option<String>,

        /// Always synthesize the localized legal text
        #[arg(long)]
        force_localized: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Tiers => commands::tiers::run().await?,
        Commands::Quote {
            total,
            lang,
            force_localized,
            json,
        } => commands::quote::run(total, lang.as_deref(), force_localized, json).await?,
    }

    Ok(())
}
