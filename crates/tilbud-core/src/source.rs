//! Document-to-text sources for flyer files.

use std::path::Path;

use tracing::warn;

use crate::models::config::PdfConfig;
use crate::pdf::PdfTextSource;

/// Converts a flyer document into plain text.
///
/// Implementations never fail: on total failure they return an empty
/// string, which callers treat as "nothing to extract".
pub trait TextSource {
    fn extract_text_from_path(&self, path: &Path) -> String;
}

/// Text source for flyers that are already plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text_from_path(&self, path: &Path) -> String {
        match std::fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                String::new()
            }
        }
    }
}

/// Kind of flyer document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Detect the document kind from the path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Text source for a document kind.
pub fn source_for(kind: DocumentKind, config: &PdfConfig) -> Box<dyn TextSource> {
    match kind {
        DocumentKind::Pdf => Box::new(PdfTextSource::new(config.clone())),
        DocumentKind::Text => Box::new(PlainTextSource),
    }
}
