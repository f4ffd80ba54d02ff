//! Batch processing command for multiple flyers.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tilbud_core::models::config::TilbudConfig;
use tilbud_core::models::{CandidateOffer, ValidityWindow};
use tilbud_core::offers::{OfferExtractor, OfferParser};
use tilbud_core::source::{source_for, DocumentKind};
use tilbud_core::store::{JsonOfferStore, OfferStore};

use super::output::{format_offers, OutputFormat};
use super::{load_config, open_store};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Market that published the flyers
    #[arg(short, long)]
    market: String,

    /// Offer store file (default: from configuration)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Extract without saving offers
    #[arg(long)]
    dry_run: bool,

    /// Write each flyer's offers to this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single flyer.
struct ProcessResult {
    path: PathBuf,
    offers: Option<Vec<CandidateOffer>>,
    validity: ValidityWindow,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let mut store = if args.dry_run {
        None
    } else {
        let mut store = open_store(args.store.as_deref(), &config)?;
        store.ensure_market(&args.market)?;
        Some(store)
    };

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = OfferExtractor::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &parser, &args, &config, store.as_mut());

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((offers, validity)) => {
                results.push(ProcessResult {
                    path,
                    offers: Some(offers),
                    validity,
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        offers: None,
                        validity: ValidityWindow::default(),
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    if let Some(store) = &store {
        store.flush()?;
    }

    let successful: Vec<_> = results.iter().filter(|r| r.offers.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_offers: usize = successful
        .iter()
        .filter_map(|r| r.offers.as_ref())
        .map(Vec::len)
        .sum();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} offers{}",
        style(successful.len()).green(),
        style(failed.len()).red(),
        total_offers,
        if args.dry_run { " (dry run)" } else { "" }
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &OfferExtractor,
    args: &BatchArgs,
    config: &TilbudConfig,
    store: Option<&mut JsonOfferStore>,
) -> anyhow::Result<(Vec<CandidateOffer>, ValidityWindow)> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| anyhow::anyhow!("Unsupported file format: {}", path.display()))?;

    let text = source_for(kind, &config.pdf).extract_text_from_path(path);
    if text.trim().is_empty() {
        debug!("Nothing to extract from {}", path.display());
        return Ok((Vec::new(), ValidityWindow::default()));
    }

    let result = parser.parse(&text, &args.market);

    if let Some(store) = store {
        store.save_offers(&result.offers)?;
    }

    if let Some(output_dir) = &args.output_dir {
        let output_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("flyer");
        let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

        fs::write(&output_path, format_offers(&result.offers, args.format)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok((result.offers, result.validity))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "offers",
        "valid_from",
        "valid_to",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(offers) = &result.offers {
            wtr.write_record([
                filename,
                "success",
                &offers.len().to_string(),
                &result.validity.valid_from.map(|d| d.to_string()).unwrap_or_default(),
                &result.validity.valid_to.map(|d| d.to_string()).unwrap_or_default(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
