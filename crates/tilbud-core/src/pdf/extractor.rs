//! PDF text extraction using pdf-extract, with a lopdf per-page fallback.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::source::TextSource;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    /// Minimum trimmed text length before the per-page fallback is tried.
    min_text_length: usize,
    /// Maximum pages read by the fallback (0 = unlimited).
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::from_config(&PdfConfig::default())
    }

    /// Create a PDF extractor from configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: config.min_text_length,
            max_pages: config.max_pages,
        }
    }

    /// Extract text page by page with lopdf, joining non-empty pages with `\n`.
    pub fn extract_text_by_page(&self) -> Result<String> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let last_page = match self.max_pages {
            0 => page_count,
            max => page_count.min(max as u32),
        };

        let mut pages = Vec::new();
        for page in 1..=last_page {
            match self.extract_page_text(page) {
                Ok(text) if !text.trim().is_empty() => pages.push(text),
                Ok(_) => debug!("Page {} has no text", page),
                Err(e) => warn!("Failed to extract text from page {}: {}", page, e),
            }
        }

        Ok(pages.join("\n"))
    }

    /// Extract text with pdf-extract, falling back to per-page extraction
    /// when the result is missing or too short. Never fails; returns an empty
    /// string when nothing could be read.
    pub fn extract_best_text(&self) -> String {
        let primary = match self.extract_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("Error extracting with pdf-extract: {}", e);
                String::new()
            }
        };

        let primary_len = primary.trim().chars().count();
        if primary_len >= self.min_text_length {
            return primary;
        }

        debug!(
            "pdf-extract returned {} chars (< {}), trying per-page extraction",
            primary_len, self.min_text_length
        );

        match self.extract_text_by_page() {
            Ok(fallback) => longer_text(primary, fallback),
            Err(e) => {
                warn!("Error extracting with lopdf: {}", e);
                primary
            }
        }
    }

    /// Read and load a PDF file.
    pub fn load_path(&mut self, path: &Path) -> crate::Result<()> {
        let data = std::fs::read(path)?;
        self.load(&data)?;
        Ok(())
    }
}

/// The fallback text wins only when it has more trimmed characters.
fn longer_text(primary: String, fallback: String) -> String {
    if fallback.trim().chars().count() > primary.trim().chars().count() {
        fallback
    } else {
        primary
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Flyer text source backed by [`PdfExtractor`].
pub struct PdfTextSource {
    config: PdfConfig,
}

impl PdfTextSource {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new(PdfConfig::default())
    }
}

impl TextSource for PdfTextSource {
    fn extract_text_from_path(&self, path: &Path) -> String {
        let mut extractor = PdfExtractor::from_config(&self.config);
        if let Err(e) = extractor.load_path(path) {
            warn!("Failed to load {}: {}", path.display(), e);
            return String::new();
        }

        let text = extractor.extract_best_text();
        debug!("Extracted {} characters from {}", text.len(), path.display());
        text
    }
}
