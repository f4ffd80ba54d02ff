//! Offer extraction from flyer text.

mod extractor;
pub mod rules;
pub mod text;

pub use extractor::{extract_offers, ExtractionResult, OfferExtractor};

/// Trait for flyer offer parsing.
///
/// Parsing never fails: fragments that cannot be interpreted are dropped,
/// so a poor document yields fewer offers rather than an error.
pub trait OfferParser {
    /// Parse offers published by `market` from flyer text.
    fn parse(&self, text: &str, market: &str) -> ExtractionResult;
}
