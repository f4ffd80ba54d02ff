//! Rendering offers as JSON, CSV or plain text.

use serde::Serialize;

use tilbud_core::models::{CandidateOffer, StoredOffer};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// One line per offer
    Text,
}

impl OutputFormat {
    /// File extension used when writing this format to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

const CSV_HEADER: [&str; 6] = ["market", "product_name", "price", "unit", "valid_from", "valid_to"];

/// An offer that can be rendered as a CSV record or a text line.
pub trait OfferRow: Serialize {
    fn record(&self) -> [String; 6];
    fn line(&self) -> String;
}

impl OfferRow for CandidateOffer {
    fn record(&self) -> [String; 6] {
        [
            self.market.clone(),
            self.product_name.clone(),
            self.price.to_string(),
            self.unit.clone().unwrap_or_default(),
            self.valid_from.map(|d| d.to_string()).unwrap_or_default(),
            self.valid_to.map(|d| d.to_string()).unwrap_or_default(),
        ]
    }

    fn line(&self) -> String {
        self.format_line()
    }
}

impl OfferRow for StoredOffer {
    fn record(&self) -> [String; 6] {
        [
            self.market.clone(),
            self.product_name.clone(),
            self.price.to_string(),
            self.unit.clone().unwrap_or_default(),
            self.valid_from.map(|d| d.to_string()).unwrap_or_default(),
            self.valid_to.map(|d| d.to_string()).unwrap_or_default(),
        ]
    }

    fn line(&self) -> String {
        format!("[{}] {}", self.market, self.format_line())
    }
}

pub fn format_offers<T: OfferRow>(offers: &[T], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(offers)?),
        OutputFormat::Csv => format_csv(offers),
        OutputFormat::Text => Ok(format_text(offers)),
    }
}

fn format_csv<T: OfferRow>(offers: &[T]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    for offer in offers {
        wtr.write_record(offer.record())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text<T: OfferRow>(offers: &[T]) -> String {
    let mut output = String::new();
    for offer in offers {
        output.push_str(&offer.line());
        output.push('\n');
    }
    output
}
