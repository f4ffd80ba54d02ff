//! Markets command - manage the market registry.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use tilbud_core::store::OfferStore;

use super::{load_config, open_store};

/// Arguments for the markets command.
#[derive(Args)]
pub struct MarketsArgs {
    /// Offer store file (default: from configuration)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: MarketsCommand,
}

#[derive(Subcommand)]
enum MarketsCommand {
    /// List known markets
    List,

    /// Create the configured default markets
    Seed,

    /// Remove a market and all of its offers
    Remove {
        /// Market name
        name: String,
    },
}

pub fn run(args: MarketsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut store = open_store(args.store.as_deref(), &config)?;

    match args.command {
        MarketsCommand::List => {
            let markets = store.markets();
            if markets.is_empty() {
                println!(
                    "{} No markets yet. Run 'tilbud markets seed' to add the defaults.",
                    style("ℹ").blue()
                );
            }
            for market in markets {
                println!("{:>4}  {}", market.id, market.name);
            }
        }
        MarketsCommand::Seed => {
            let created = store.seed_markets(&config.store.default_markets)?;
            store.flush()?;
            println!(
                "{} Created {} markets ({} total)",
                style("✓").green(),
                created,
                store.markets().len()
            );
        }
        MarketsCommand::Remove { name } => {
            let removed = store.remove_market(&name)?;
            store.flush()?;
            println!(
                "{} Removed {} and {} offers",
                style("✓").green(),
                name,
                removed
            );
        }
    }

    Ok(())
}
