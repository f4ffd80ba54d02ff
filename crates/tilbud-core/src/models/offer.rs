//! Offer and market data models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency marker used when rendering prices.
pub const CURRENCY: &str = "kr";

/// An offer assembled from one flyer text, before a store assigns it an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateOffer {
    /// Name of the market that published the flyer.
    pub market: String,

    /// Product name, trimmed and capped in length.
    pub product_name: String,

    /// Offer price in whole currency units.
    pub price: Decimal,

    /// Unit of measure (kg, l, stk, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// First day of the flyer's validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,

    /// Last day of the flyer's validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,
}

/// Validity window shared by every offer of one flyer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

impl ValidityWindow {
    /// Build the window from dates in discovery order: first is `from`, second is `to`.
    pub fn from_dates(dates: &[NaiveDate]) -> Self {
        Self {
            valid_from: dates.first().copied(),
            valid_to: dates.get(1).copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.valid_from.is_none() && self.valid_to.is_none()
    }

    /// Format the window for display ("2024-11-01 - 2024-11-07").
    pub fn format(&self) -> String {
        match (self.valid_from, self.valid_to) {
            (Some(from), Some(to)) => format!("{} - {}", from, to),
            (Some(from), None) => format!("from {}", from),
            (None, Some(to)) => format!("until {}", to),
            (None, None) => String::new(),
        }
    }
}

impl CandidateOffer {
    /// The validity window this offer carries.
    pub fn validity(&self) -> ValidityWindow {
        ValidityWindow {
            valid_from: self.valid_from,
            valid_to: self.valid_to,
        }
    }

    /// Format the offer as a single line of text.
    pub fn format_line(&self) -> String {
        format_offer_line(
            &self.product_name,
            self.price,
            self.unit.as_deref(),
            self.validity(),
        )
    }
}

/// A supermarket chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Store-assigned identifier.
    pub id: u64,

    /// Unique market name.
    pub name: String,

    /// When the market was first recorded.
    pub created_at: DateTime<Utc>,
}

/// An offer persisted by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOffer {
    /// Store-assigned identifier.
    pub id: u64,

    /// Identifier of the owning market.
    pub market_id: u64,

    /// Name of the owning market.
    pub market: String,

    pub product_name: String,

    pub price: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,

    /// When the offer was extracted and saved.
    pub extracted_at: DateTime<Utc>,
}

impl StoredOffer {
    pub fn validity(&self) -> ValidityWindow {
        ValidityWindow {
            valid_from: self.valid_from,
            valid_to: self.valid_to,
        }
    }

    /// Format the offer as a single line of text.
    pub fn format_line(&self) -> String {
        format_offer_line(
            &self.product_name,
            self.price,
            self.unit.as_deref(),
            self.validity(),
        )
    }
}

fn format_offer_line(name: &str, price: Decimal, unit: Option<&str>, validity: ValidityWindow) -> String {
    let mut line = format!("{}: {:.2} {}", name, price, CURRENCY);
    if let Some(unit) = unit {
        line.push_str(&format!(" / {}", unit));
    }
    if !validity.is_empty() {
        line.push_str(&format!(" ({})", validity.format()));
    }
    line
}
