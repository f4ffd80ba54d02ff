//! Configuration structures for the offer pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, TilbudError};

/// Main configuration for the tilbud pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TilbudConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Offer extraction configuration.
    pub extraction: ExtractionConfig,

    /// Offer store configuration.
    pub store: StoreConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length before falling back to per-page extraction.
    pub min_text_length: usize,

    /// Maximum pages read by the per-page fallback (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            max_pages: 0,
        }
    }
}

/// Offer extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum distance (in characters) between a price and its unit.
    pub unit_radius: usize,

    /// Product names shorter than this (after trimming) are dropped.
    pub min_product_name_len: usize,

    /// Product names are truncated to this many characters.
    pub max_product_name_len: usize,

    /// Reference year for expanding two-digit years (None = current year).
    pub reference_year: Option<i32>,

    /// Day of month for dates written without a day (None = today's day).
    pub reference_day: Option<u32>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            unit_radius: 100,
            min_product_name_len: 3,
            max_product_name_len: 255,
            reference_year: None,
            reference_day: None,
        }
    }
}

/// Offer store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON store file.
    pub path: PathBuf,

    /// Markets created by `markets seed`.
    pub default_markets: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tilbud.json"),
            default_markets: DEFAULT_MARKETS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Markets every fresh store is seeded with.
pub const DEFAULT_MARKETS: [&str; 5] = ["Bilka", "Rema 1000", "Netto", "Føtex", "Lidl"];

impl TilbudConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that would make the pipeline unusable.
    pub fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(TilbudError::Config("store.path is empty".to_string()));
        }
        if self.store.default_markets.iter().any(|m| m.trim().is_empty()) {
            return Err(TilbudError::Config(
                "store.default_markets contains a blank name".to_string(),
            ));
        }
        if self.extraction.max_product_name_len == 0 {
            return Err(TilbudError::Config(
                "extraction.max_product_name_len must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TilbudConfig::default();
        assert_eq!(config.extraction.unit_radius, 100);
        assert_eq!(config.extraction.min_product_name_len, 3);
        assert_eq!(config.extraction.max_product_name_len, 255);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.store.default_markets.len(), 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TilbudConfig =
            serde_json::from_str(r#"{"extraction": {"unit_radius": 40}}"#).unwrap();
        assert_eq!(config.extraction.unit_radius, 40);
        assert_eq!(config.extraction.min_product_name_len, 3);
        assert_eq!(config.store.path, PathBuf::from("tilbud.json"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = TilbudConfig::default();
        config.extraction.reference_year = Some(2024);
        config.save(&path).unwrap();

        let loaded = TilbudConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.reference_year, Some(2024));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(matches!(TilbudConfig::from_file(&path), Err(TilbudError::Io(_))));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(TilbudConfig::from_file(&path), Err(TilbudError::Json(_))));
    }

    #[test]
    fn test_validate() {
        assert!(TilbudConfig::default().validate().is_ok());

        let mut config = TilbudConfig::default();
        config.store.default_markets.push(" ".to_string());
        assert!(matches!(config.validate(), Err(TilbudError::Config(_))));

        let mut config = TilbudConfig::default();
        config.store.path = PathBuf::new();
        assert!(matches!(config.validate(), Err(TilbudError::Config(_))));
    }
}
