//! Core library for extracting offers from Danish supermarket flyers.
//!
//! This crate provides:
//! - PDF and plain-text flyer sources
//! - Rule-based extraction of prices, units and validity dates
//! - Assembly of candidate offers from those mentions
//! - A JSON-file offer store with search, sorting and pagination

pub mod error;
pub mod models;
pub mod offers;
pub mod pdf;
pub mod source;
pub mod store;

pub use error::{Result, TilbudError};
pub use models::{CandidateOffer, Market, StoredOffer, TilbudConfig, ValidityWindow};
pub use offers::{extract_offers, ExtractionResult, OfferExtractor, OfferParser};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource};
pub use source::{source_for, DocumentKind, PlainTextSource, TextSource};
pub use store::{JsonOfferStore, OfferPage, OfferQuery, OfferStore, SortOrder};
