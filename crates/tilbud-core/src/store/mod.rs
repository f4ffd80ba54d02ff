//! Offer persistence.
//!
//! Stores assign identities to candidate offers, keep the market registry,
//! and answer filtered, sorted, paginated queries.

mod json;

pub use json::JsonOfferStore;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::offer::{CandidateOffer, Market, StoredOffer};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Trait for offer stores.
pub trait OfferStore {
    /// All markets, in creation order.
    fn markets(&self) -> Vec<Market>;

    /// Look up a market by exact name.
    fn find_market(&self, name: &str) -> Option<Market>;

    /// Return the market with this name, creating it if missing.
    fn ensure_market(&mut self, name: &str) -> Result<Market>;

    /// Remove a market and all of its offers. Returns the number of offers removed.
    fn remove_market(&mut self, name: &str) -> Result<usize>;

    /// Persist offers, creating their markets as needed. Returns the number saved.
    fn save_offers(&mut self, offers: &[CandidateOffer]) -> Result<usize>;

    /// Query stored offers.
    fn query(&self, query: &OfferQuery) -> Result<OfferPage>;

    /// Create every named market that does not exist yet. Returns the number created.
    fn seed_markets(&mut self, names: &[String]) -> Result<usize> {
        let mut created = 0;
        for name in names {
            let name = name.trim();
            if self.find_market(name).is_none() {
                self.ensure_market(name)?;
                created += 1;
            }
        }
        Ok(created)
    }
}

/// Price sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    PriceAsc,
    PriceDesc,
}

/// Offer query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Market name; an unknown market filters nothing out.
    pub market: Option<String>,
    pub sort: SortOrder,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Default for OfferQuery {
    fn default() -> Self {
        Self {
            search: None,
            market: None,
            sort: SortOrder::PriceAsc,
            page: 1,
            per_page: 20,
        }
    }
}

impl OfferQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(StoreError::InvalidQuery("page starts at 1".to_string()));
        }
        if self.per_page == 0 {
            return Err(StoreError::InvalidQuery("per_page must be positive".to_string()));
        }
        Ok(())
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPage {
    pub offers: Vec<StoredOffer>,
    /// Number of offers matching the filters, across all pages.
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    /// Number of pages.
    pub pages: usize,
}
