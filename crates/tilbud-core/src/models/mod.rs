//! Data models for offers, markets, and configuration.

pub mod config;
pub mod offer;

pub use config::TilbudConfig;
pub use offer::{CandidateOffer, Market, StoredOffer, ValidityWindow};
