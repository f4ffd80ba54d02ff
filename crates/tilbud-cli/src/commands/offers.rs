//! Offers command - search stored offers.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::style;

use tilbud_core::store::{OfferQuery, OfferStore, SortOrder};

use super::output::{format_offers, OutputFormat};
use super::{load_config, open_store};

/// Arguments for the offers command.
#[derive(Args)]
pub struct OffersArgs {
    /// Offer store file (default: from configuration)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Case-insensitive product name search
    #[arg(short = 'q', long)]
    search: Option<String>,

    /// Only offers from this market
    #[arg(short, long)]
    market: Option<String>,

    /// Price sort order
    #[arg(long, value_enum, default_value = "asc")]
    sort: SortArg,

    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Offers per page
    #[arg(long, default_value = "20")]
    per_page: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    /// Cheapest first
    Asc,
    /// Most expensive first
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::PriceAsc,
            SortArg::Desc => SortOrder::PriceDesc,
        }
    }
}

pub fn run(args: OffersArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(args.store.as_deref(), &config)?;

    let mut query = OfferQuery::default()
        .with_sort(args.sort.into())
        .with_page(args.page, args.per_page);
    if let Some(search) = args.search {
        query = query.with_search(search);
    }
    if let Some(market) = args.market {
        query = query.with_market(market);
    }

    let page = store.query(&query)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Csv => print!("{}", format_offers(&page.offers, args.format)?),
        OutputFormat::Text => {
            if page.offers.is_empty() {
                println!("{} No offers found.", style("ℹ").blue());
            } else {
                print!("{}", format_offers(&page.offers, args.format)?);
                println!();
                println!(
                    "Page {} of {} ({} offers)",
                    page.page,
                    page.pages.max(1),
                    page.total
                );
            }
        }
    }

    Ok(())
}
