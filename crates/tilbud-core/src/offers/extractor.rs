//! Offer assembly: pairs prices with product names, units, and the flyer's
//! validity window.

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::offer::{CandidateOffer, ValidityWindow};

use super::rules::{
    DateScanner, MentionScanner, PriceMention, PriceScanner, UnitMention, UnitScanner,
};
use super::text::TextIndex;
use super::OfferParser;

/// Result of offer extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Offers in price discovery order.
    pub offers: Vec<CandidateOffer>,
    /// Validity window shared by every offer.
    pub validity: ValidityWindow,
    /// Dates found, in discovery order.
    pub dates: Vec<NaiveDate>,
    /// Number of price mentions found.
    pub price_mentions: usize,
    /// Number of unit mentions found.
    pub unit_mentions: usize,
    /// Prices dropped because their product name was too short.
    pub skipped_short_names: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based offer extractor.
pub struct OfferExtractor {
    /// Maximum price/unit distance in characters (exclusive).
    unit_radius: usize,
    /// Minimum trimmed product name length in characters.
    min_name_len: usize,
    /// Product names are truncated to this many characters.
    max_name_len: usize,
    prices: PriceScanner,
    units: UnitScanner,
    dates: DateScanner,
}

impl OfferExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut dates = DateScanner::new();
        if let Some(year) = config.reference_year {
            dates = dates.with_reference_year(year);
        }
        if let Some(day) = config.reference_day {
            dates = dates.with_reference_day(day);
        }

        Self {
            unit_radius: config.unit_radius,
            min_name_len: config.min_product_name_len,
            max_name_len: config.max_product_name_len,
            prices: PriceScanner::new(),
            units: UnitScanner::new(),
            dates,
        }
    }

    /// Set the price/unit association radius.
    pub fn with_unit_radius(mut self, radius: usize) -> Self {
        self.unit_radius = radius;
        self
    }

    /// Set the reference year for two-digit year expansion.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.dates = self.dates.with_reference_year(year);
        self
    }

    /// Extract candidate offers published by `market`.
    pub fn extract(&self, text: &str, market: &str) -> Vec<CandidateOffer> {
        self.parse(text, market).offers
    }

    /// Product name for a price: the part of its line before the first
    /// occurrence of the price's matched text.
    fn product_name(&self, index: &TextIndex<'_>, price: &PriceMention) -> Option<String> {
        let line = index.line_at(price.offset)?;

        let end = match line.text.find(&price.matched_text) {
            Some(pos) => pos,
            // The match ran past the end of the line ("12,50\nkr").
            None => index
                .byte_offset(price.offset)
                .saturating_sub(line.start_byte)
                .min(line.text.len()),
        };

        let name = line.text[..end].trim();
        if name.chars().count() < self.min_name_len {
            trace!("Dropping price {} with short product name {:?}", price.amount, name);
            return None;
        }

        Some(name.chars().take(self.max_name_len).collect())
    }

    /// Unit of the closest unit mention within the radius; first found wins ties.
    fn nearest_unit<'u>(&self, units: &'u [UnitMention], offset: usize) -> Option<&'u UnitMention> {
        let mut nearest = None;
        let mut min_distance = usize::MAX;

        for unit in units {
            let distance = unit.offset.abs_diff(offset);
            if distance < min_distance && distance < self.unit_radius {
                min_distance = distance;
                nearest = Some(unit);
            }
        }

        nearest
    }
}

impl Default for OfferExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferParser for OfferExtractor {
    fn parse(&self, text: &str, market: &str) -> ExtractionResult {
        let start = Instant::now();

        if text.trim().is_empty() {
            debug!("Empty text for market {}, nothing to extract", market);
            return ExtractionResult {
                offers: Vec::new(),
                validity: ValidityWindow::default(),
                dates: Vec::new(),
                price_mentions: 0,
                unit_mentions: 0,
                skipped_short_names: 0,
                processing_time_ms: start.elapsed().as_millis() as u64,
            };
        }

        let index = TextIndex::new(text);
        let prices = self.prices.scan_indexed(&index);
        let units = self.units.scan_indexed(&index);
        let dates: Vec<NaiveDate> = self
            .dates
            .scan_indexed(&index)
            .into_iter()
            .map(|m| m.date)
            .collect();

        debug!(
            "Found {} prices, {} units, {} dates in {} lines",
            prices.len(),
            units.len(),
            dates.len(),
            index.lines().len()
        );

        let validity = ValidityWindow::from_dates(&dates);
        let mut offers = Vec::with_capacity(prices.len());
        let mut skipped_short_names = 0;

        for price in &prices {
            let Some(product_name) = self.product_name(&index, price) else {
                skipped_short_names += 1;
                continue;
            };

            let unit = self
                .nearest_unit(&units, price.offset)
                .map(|u| u.unit.clone());

            offers.push(CandidateOffer {
                market: market.to_string(),
                product_name,
                price: price.amount,
                unit,
                valid_from: validity.valid_from,
                valid_to: validity.valid_to,
            });
        }

        debug!(
            "Extracted {} offers for {} ({} skipped)",
            offers.len(),
            market,
            skipped_short_names
        );

        ExtractionResult {
            offers,
            validity,
            dates,
            price_mentions: prices.len(),
            unit_mentions: units.len(),
            skipped_short_names,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Extract offers with the default extractor.
pub fn extract_offers(text: &str, market: &str) -> Vec<CandidateOffer> {
    OfferExtractor::new().extract(text, market)
}
