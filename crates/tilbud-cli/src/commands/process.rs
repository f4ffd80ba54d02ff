//! Process command - extract offers from a single flyer.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tilbud_core::offers::{ExtractionResult, OfferExtractor, OfferParser};
use tilbud_core::source::{source_for, DocumentKind};
use tilbud_core::store::OfferStore;

use super::output::{format_offers, OutputFormat};
use super::{load_config, open_store};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input flyer (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Market that published the flyer
    #[arg(short, long)]
    market: String,

    /// Offer store file (default: from configuration)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Print offers without saving them
    #[arg(long)]
    dry_run: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction statistics
    #[arg(long)]
    show_stats: bool,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let Some(kind) = DocumentKind::from_path(&args.input) else {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    };

    info!("Processing flyer {} for {}", args.input.display(), args.market);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Extracting text...");
    pb.set_position(10);
    let text = source_for(kind, &config.pdf).extract_text_from_path(&args.input);

    if text.trim().is_empty() {
        pb.finish_and_clear();
        eprintln!(
            "{} Nothing to extract from {}",
            style("ℹ").blue(),
            args.input.display()
        );
        return Ok(());
    }

    pb.set_message("Extracting offers...");
    pb.set_position(50);
    let parser = OfferExtractor::from_config(&config.extraction);
    let result = parser.parse(&text, &args.market);

    if !args.dry_run {
        pb.set_message("Saving offers...");
        pb.set_position(80);

        let mut store = open_store(args.store.as_deref(), &config)?;
        store.ensure_market(&args.market)?;
        let saved = store.save_offers(&result.offers)?;
        store.flush()?;

        pb.finish_and_clear();
        eprintln!(
            "{} Saved {} offers for {} to {}",
            style("✓").green(),
            saved,
            args.market,
            store.path().map(|p| p.display().to_string()).unwrap_or_default()
        );
    } else {
        pb.finish_and_clear();
    }

    let output = format_offers(&result.offers, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
        if matches!(args.format, OutputFormat::Json) {
            println!();
        }
    }

    if args.show_stats {
        print_stats(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_stats(result: &ExtractionResult) {
    eprintln!();
    eprintln!("{} Offers: {}", style("ℹ").blue(), result.offers.len());
    eprintln!(
        "{} Mentions: {} prices, {} units, {} dates",
        style("ℹ").blue(),
        result.price_mentions,
        result.unit_mentions,
        result.dates.len()
    );
    if result.skipped_short_names > 0 {
        eprintln!(
            "{} Skipped {} prices with too short product names",
            style("ℹ").blue(),
            result.skipped_short_names
        );
    }
    if !result.validity.is_empty() {
        eprintln!("{} Valid: {}", style("ℹ").blue(), result.validity.format());
    }
    eprintln!(
        "{} Processing time: {}ms",
        style("ℹ").blue(),
        result.processing_time_ms
    );
}
