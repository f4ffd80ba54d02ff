//! Common regex patterns for Danish flyer extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Closed vocabulary of weight, volume, and packaging units.
///
/// Order matters: alternation is leftmost-first, so `stk` wins over `stk.`
/// whenever both could end on a word boundary.
pub const UNIT_VOCABULARY: [&str; 13] = [
    "kg", "g", "l", "ml", "cl", "dl", "stk", "stk.", "pk", "pk.", "bk", "ps", "pose",
];

lazy_static! {
    // Prices: "12,50 kr", "12 kr", "12,50,-", "12,-"
    pub static ref PRICE_FRACTIONAL_KR: Regex = Regex::new(
        r"(?i)(\d+)[,.](\d{2})\s*kr"
    ).unwrap();

    pub static ref PRICE_WHOLE_KR: Regex = Regex::new(
        r"(?i)(\d+)\s*kr"
    ).unwrap();

    pub static ref PRICE_FRACTIONAL_DASH: Regex = Regex::new(
        r"(\d+)[,.](\d{2})\s*,-"
    ).unwrap();

    pub static ref PRICE_WHOLE_DASH: Regex = Regex::new(
        r"(\d+)\s*,-"
    ).unwrap();

    // Quantity + unit: "2 kg", "1,5 l", "6stk"
    pub static ref UNIT_QUANTITY: Regex = Regex::new(&format!(
        r"(?i)\b(\d+[,.]?\d*)\s*({})\b",
        UNIT_VOCABULARY
            .iter()
            .map(|u| regex::escape(u))
            .collect::<Vec<_>>()
            .join("|")
    )).unwrap();

    // Dates, matched against lower-cased text with English month names
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_DOTTED_MONTH: Regex = Regex::new(
        r"\b(\d{1,2})\.\s*(\w+)\s*(\d{4})\b"
    ).unwrap();

    pub static ref DATE_SPACED_MONTH: Regex = Regex::new(
        r"\b(\d{1,2})\s+(\w+)\s+(\d{4})\b"
    ).unwrap();
}
