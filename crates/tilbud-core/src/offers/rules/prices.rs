//! Price extraction for Danish flyers ("12,50 kr", "25 kr", "12,50,-", "25,-").

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::{PRICE_FRACTIONAL_DASH, PRICE_FRACTIONAL_KR, PRICE_WHOLE_DASH, PRICE_WHOLE_KR};
use super::MentionScanner;
use crate::offers::text::TextIndex;

/// A monetary amount found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceMention {
    /// Parsed amount in whole currency units.
    pub amount: Decimal,
    /// Character offset of the match start.
    pub offset: usize,
    /// The exact matched text, currency marker included.
    pub matched_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceShape {
    /// Integer group plus a two-digit group of hundredths.
    Fractional,
    /// A lone integer token.
    Whole,
}

fn price_patterns() -> [(&'static Regex, PriceShape); 4] {
    [
        (&PRICE_FRACTIONAL_KR, PriceShape::Fractional),
        (&PRICE_WHOLE_KR, PriceShape::Whole),
        (&PRICE_FRACTIONAL_DASH, PriceShape::Fractional),
        (&PRICE_WHOLE_DASH, PriceShape::Whole),
    ]
}

/// Price mention scanner.
pub struct PriceScanner;

impl PriceScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PriceScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionScanner for PriceScanner {
    type Mention = PriceMention;

    fn scan_indexed(&self, index: &TextIndex<'_>) -> Vec<Self::Mention> {
        let text = index.text();
        let mut results = Vec::new();

        for (pattern, shape) in price_patterns() {
            for caps in pattern.captures_iter(text) {
                let Some(full_match) = caps.get(0) else {
                    continue;
                };

                let amount = match shape {
                    PriceShape::Fractional => parse_fractional(&caps[1], &caps[2]),
                    PriceShape::Whole => {
                        if is_fraction_group(text, full_match.start()) {
                            trace!("Skipping fractional group {:?} as whole price", full_match.as_str());
                            continue;
                        }
                        parse_whole(&caps[1])
                    }
                };

                if let Some(amount) = amount {
                    results.push(PriceMention {
                        amount,
                        offset: index.char_offset(full_match.start()),
                        matched_text: full_match.as_str().to_string(),
                    });
                }
            }
        }

        results
    }
}

/// Join an integer group and a two-digit group of hundredths ("12" + "50" = 12.50).
pub fn parse_fractional(integer_part: &str, hundredths: &str) -> Option<Decimal> {
    Decimal::from_str(&format!("{}.{}", integer_part, hundredths)).ok()
}

/// Parse a whole-unit amount ("25" = 25).
pub fn parse_whole(integer_part: &str) -> Option<Decimal> {
    Decimal::from_str(integer_part).ok()
}

/// Whether the integer starting at `start` is the hundredths group of a
/// decimal amount, i.e. immediately preceded by `<digit>,` or `<digit>.`.
fn is_fraction_group(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    matches!(
        (before.next(), before.next()),
        (Some(',' | '.'), Some(d)) if d.is_ascii_digit()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fractional_price() {
        let prices = PriceScanner::new().scan("Mælk 12,50 kr");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount, dec!(12.50));
        assert_eq!(prices[0].matched_text, "12,50 kr");
        assert_eq!(prices[0].offset, 5);
    }

    #[test]
    fn test_period_separator() {
        let prices = PriceScanner::new().scan("Kaffe 39.95 kr");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount, dec!(39.95));
    }

    #[test]
    fn test_whole_price() {
        let prices = PriceScanner::new().scan("Brød 25 kr");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount, dec!(25.0));
        assert_eq!(prices[0].matched_text, "25 kr");
    }

    #[test]
    fn test_case_insensitive_marker() {
        let prices = PriceScanner::new().scan("Ost 35KR");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount, dec!(35));
    }

    #[test]
    fn test_dash_marker() {
        let prices = PriceScanner::new().scan("Smør 18,95,-\nRugbrød 15,-");
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].amount, dec!(18.95));
        assert_eq!(prices[1].amount, dec!(15));
        assert_eq!(prices[1].matched_text, "15,-");
    }

    #[test]
    fn test_hundredths_not_reported_as_whole_price() {
        let prices = PriceScanner::new().scan("Banan 12,50 kr\nPære 3.00,-");
        let amounts: Vec<Decimal> = prices.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![dec!(12.50), dec!(3.00)]);
    }

    #[test]
    fn test_discovery_order_follows_pattern_order() {
        // Whole-amount matches are reported after every fractional "kr" match.
        let prices = PriceScanner::new().scan("Ost 20 kr\nSkinke 19,95 kr");
        let amounts: Vec<Decimal> = prices.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![dec!(19.95), dec!(20)]);
    }

    #[test]
    fn test_no_deduplication_across_patterns() {
        let prices = PriceScanner::new().scan("Vin 49 kr 49,-");
        assert_eq!(prices.len(), 2);
        assert!(prices.iter().all(|p| p.amount == dec!(49)));
    }

    #[test]
    fn test_no_prices() {
        assert!(PriceScanner::new().scan("Ugens bedste tilbud").is_empty());
        assert!(PriceScanner::new().scan("").is_empty());
    }

    #[test]
    fn test_unparseable_amount_is_dropped() {
        let huge = format!("Guld {} kr", "9".repeat(40));
        assert!(PriceScanner::new().scan(&huge).is_empty());
    }
}
