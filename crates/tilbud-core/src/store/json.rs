//! JSON-file backed offer store.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{OfferPage, OfferQuery, OfferStore, Result, SortOrder};
use crate::error::StoreError;
use crate::models::offer::{CandidateOffer, Market, StoredOffer};

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreData {
    next_market_id: u64,
    next_offer_id: u64,
    markets: Vec<Market>,
    offers: Vec<StoredOffer>,
}

/// Offer store kept in memory and persisted to a single JSON file.
///
/// Changes are held in memory until [`JsonOfferStore::flush`] is called.
pub struct JsonOfferStore {
    path: Option<PathBuf>,
    data: StoreData,
}

impl JsonOfferStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))?
        } else {
            debug!("No store file at {}, starting empty", path.display());
            StoreData::default()
        };

        debug!(
            "Opened store {} with {} markets and {} offers",
            path.display(),
            data.markets.len(),
            data.offers.len()
        );

        Ok(Self {
            path: Some(path),
            data,
        })
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: StoreData::default(),
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored offers.
    pub fn offer_count(&self) -> usize {
        self.data.offers.len()
    }

    /// Write the store to its backing file.
    pub fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.data)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(path, content)?;

        debug!("Flushed store to {}", path.display());
        Ok(())
    }
}

impl OfferStore for JsonOfferStore {
    fn markets(&self) -> Vec<Market> {
        self.data.markets.clone()
    }

    fn find_market(&self, name: &str) -> Option<Market> {
        self.data.markets.iter().find(|m| m.name == name).cloned()
    }

    fn ensure_market(&mut self, name: &str) -> Result<Market> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName(name.to_string()));
        }

        if let Some(market) = self.find_market(name) {
            return Ok(market);
        }

        self.data.next_market_id += 1;
        let market = Market {
            id: self.data.next_market_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };

        info!("Creating new market: {}", market.name);
        self.data.markets.push(market.clone());
        Ok(market)
    }

    fn remove_market(&mut self, name: &str) -> Result<usize> {
        let market = self
            .find_market(name)
            .ok_or_else(|| StoreError::MarketNotFound(name.to_string()))?;

        let before = self.data.offers.len();
        self.data.offers.retain(|o| o.market_id != market.id);
        self.data.markets.retain(|m| m.id != market.id);

        Ok(before - self.data.offers.len())
    }

    fn save_offers(&mut self, offers: &[CandidateOffer]) -> Result<usize> {
        let extracted_at = Utc::now();

        for offer in offers {
            let market = self.ensure_market(&offer.market)?;

            self.data.next_offer_id += 1;
            self.data.offers.push(StoredOffer {
                id: self.data.next_offer_id,
                market_id: market.id,
                market: market.name,
                product_name: offer.product_name.clone(),
                price: offer.price,
                unit: offer.unit.clone(),
                valid_from: offer.valid_from,
                valid_to: offer.valid_to,
                extracted_at,
            });
        }

        debug!("Saved {} offers", offers.len());
        Ok(offers.len())
    }

    fn query(&self, query: &OfferQuery) -> Result<OfferPage> {
        query.validate()?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let market_id = query
            .market
            .as_deref()
            .filter(|m| !m.is_empty())
            .and_then(|name| self.find_market(name))
            .map(|m| m.id);

        let mut matches: Vec<&StoredOffer> = self
            .data
            .offers
            .iter()
            .filter(|o| match &search {
                Some(term) => o.product_name.to_lowercase().contains(term.as_str()),
                None => true,
            })
            .filter(|o| market_id.is_none_or(|id| o.market_id == id))
            .collect();

        match query.sort {
            SortOrder::PriceAsc => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => matches.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        let total = matches.len();
        let pages = total.div_ceil(query.per_page);
        let offers = matches
            .into_iter()
            .skip((query.page - 1).saturating_mul(query.per_page))
            .take(query.per_page)
            .cloned()
            .collect();

        Ok(OfferPage {
            offers,
            total,
            page: query.page,
            per_page: query.per_page,
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::StoreConfig;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn offer(market: &str, name: &str, price: Decimal) -> CandidateOffer {
        CandidateOffer {
            market: market.to_string(),
            product_name: name.to_string(),
            price,
            unit: None,
            valid_from: None,
            valid_to: None,
        }
    }

    fn sample_store() -> JsonOfferStore {
        let mut store = JsonOfferStore::in_memory();
        store
            .save_offers(&[
                offer("Bilka", "Bananer", dec!(12.50)),
                offer("Bilka", "Rugbrød", dec!(15.00)),
                offer("Netto", "Bananer", dec!(11.95)),
                offer("Netto", "Minimælk", dec!(6.95)),
                offer("Føtex", "Økologiske Bananer", dec!(15.95)),
            ])
            .unwrap();
        store
    }

    fn names(page: &OfferPage) -> Vec<(&str, &str)> {
        page.offers
            .iter()
            .map(|o| (o.market.as_str(), o.product_name.as_str()))
            .collect()
    }

    #[test]
    fn test_seed_markets_is_idempotent() {
        let mut store = JsonOfferStore::in_memory();
        store.ensure_market("Netto").unwrap();

        let defaults = StoreConfig::default().default_markets;
        assert_eq!(store.seed_markets(&defaults).unwrap(), 4);
        assert_eq!(store.seed_markets(&defaults).unwrap(), 0);

        let markets = store.markets();
        assert_eq!(markets.len(), 5);
        assert_eq!(markets[0].name, "Netto");
        assert_eq!(markets[3].name, "Føtex");
        assert_eq!(markets[3].id, 4);
    }

    #[test]
    fn test_seed_markets_trims_names() {
        let mut store = JsonOfferStore::in_memory();
        let names = vec![" Bilka".to_string(), "Bilka ".to_string()];

        assert_eq!(store.seed_markets(&names).unwrap(), 1);
        assert_eq!(store.seed_markets(&names).unwrap(), 0);
        assert_eq!(store.markets().len(), 1);
        assert_eq!(store.markets()[0].name, "Bilka");
    }

    #[test]
    fn test_ensure_market_rejects_blank_names() {
        let mut store = JsonOfferStore::in_memory();
        assert!(matches!(store.ensure_market("  "), Err(StoreError::InvalidName(_))));
    }

    #[test]
    fn test_save_assigns_ids_and_markets() {
        let store = sample_store();
        assert_eq!(store.offer_count(), 5);
        assert_eq!(store.markets().len(), 3);

        let page = store.query(&OfferQuery::default()).unwrap();
        let mut ids: Vec<u64> = page.offers.iter().map(|o| o.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_query_sorts_by_price() {
        let store = sample_store();

        let page = store.query(&OfferQuery::default()).unwrap();
        let prices: Vec<Decimal> = page.offers.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![dec!(6.95), dec!(11.95), dec!(12.50), dec!(15.00), dec!(15.95)]);

        let page = store
            .query(&OfferQuery::default().with_sort(SortOrder::PriceDesc))
            .unwrap();
        assert_eq!(page.offers[0].price, dec!(15.95));
    }

    #[test]
    fn test_query_search_and_market() {
        let store = sample_store();

        let page = store.query(&OfferQuery::default().with_search("banan")).unwrap();
        assert_eq!(page.total, 3);

        let page = store
            .query(&OfferQuery::default().with_search("BANANER").with_market("Netto"))
            .unwrap();
        assert_eq!(names(&page), vec![("Netto", "Bananer")]);
    }

    #[test]
    fn test_unknown_market_does_not_filter() {
        let store = sample_store();
        let page = store.query(&OfferQuery::default().with_market("Aldi")).unwrap();
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_pagination() {
        let store = sample_store();

        let page = store.query(&OfferQuery::default().with_page(2, 2)).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.pages, 3);
        assert_eq!(names(&page), vec![("Bilka", "Bananer"), ("Bilka", "Rugbrød")]);

        let page = store.query(&OfferQuery::default().with_page(4, 2)).unwrap();
        assert!(page.offers.is_empty());

        assert!(matches!(
            store.query(&OfferQuery::default().with_page(0, 2)),
            Err(StoreError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_remove_market_cascades() {
        let mut store = sample_store();
        assert_eq!(store.remove_market("Bilka").unwrap(), 2);
        assert_eq!(store.offer_count(), 3);
        assert!(store.find_market("Bilka").is_none());
        assert!(matches!(store.remove_market("Bilka"), Err(StoreError::MarketNotFound(_))));
    }

    #[test]
    fn test_flush_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("tilbud.json");

        let mut store = JsonOfferStore::open(&path).unwrap();
        store.save_offers(&[offer("Lidl", "Kaffe", dec!(39.95))]).unwrap();
        store.flush().unwrap();

        let mut reopened = JsonOfferStore::open(&path).unwrap();
        assert_eq!(reopened.offer_count(), 1);
        assert_eq!(reopened.find_market("Lidl").unwrap().id, 1);

        // Identifiers continue after reopening.
        reopened.save_offers(&[offer("Lidl", "Te", dec!(20))]).unwrap();
        let page = reopened.query(&OfferQuery::default()).unwrap();
        assert_eq!(page.offers[0].id, 2);
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tilbud.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonOfferStore::open(&path), Err(StoreError::Corrupt(_))));
    }
}
