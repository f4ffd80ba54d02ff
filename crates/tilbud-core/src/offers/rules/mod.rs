//! Rule-based mention scanners for Danish supermarket flyers.
//!
//! Each scanner is an independent pass over the whole text that returns its
//! mentions in discovery order: patterns are applied one after another, and
//! matches of one pattern are reported left to right. Fragments that do not
//! parse are dropped, never reported as errors.

pub mod dates;
pub mod patterns;
pub mod prices;
pub mod units;

pub use dates::{normalize_month_names, DateMention, DateScanner};
pub use patterns::UNIT_VOCABULARY;
pub use prices::{PriceMention, PriceScanner};
pub use units::{UnitMention, UnitScanner};

use super::text::TextIndex;

/// Trait for mention scanners.
pub trait MentionScanner {
    /// The type of mention this scanner produces.
    type Mention;

    /// Scan an indexed text and return all mentions in discovery order.
    fn scan_indexed(&self, index: &TextIndex<'_>) -> Vec<Self::Mention>;

    /// Scan plain text.
    fn scan(&self, text: &str) -> Vec<Self::Mention> {
        self.scan_indexed(&TextIndex::new(text))
    }
}
