//! PDF text extraction and page loading.

mod extractor;

pub use extractor::{PdfExtractor, PdfPage};

use std::path::Path;

use tracing::debug;

use crate::error::{BidsheetError, PdfError};
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text extraction implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<PdfPage>>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Page separator written by `pdftotext` and similar tools.
pub const FORM_FEED: char = '\u{000c}';

/// Split pre-extracted text into pages on form feeds.
///
/// A trailing form feed does not start an extra page.
pub fn split_text_pages(text: &str) -> Vec<&str> {
    let text = text.strip_suffix(FORM_FEED).unwrap_or(text);
    text.split(FORM_FEED).collect()
}

/// Load the page texts of a `.pdf` or pre-extracted `.txt` document.
///
/// `config.max_pages` limits how many pages are returned (0 = all).
pub fn read_pages(path: &Path, config: &PdfConfig) -> crate::Result<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut pages: Vec<String> = match extension.as_str() {
        "pdf" => {
            let data = std::fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            extractor
                .extract_pages()?
                .into_iter()
                .map(|page| page.text)
                .collect()
        }
        "txt" => {
            let text = std::fs::read_to_string(path)?;
            split_text_pages(&text).into_iter().map(str::to_string).collect()
        }
        other => {
            return Err(BidsheetError::Config(format!(
                "unsupported input format: {:?}",
                other
            )));
        }
    };

    if config.max_pages > 0 && pages.len() > config.max_pages {
        debug!("Limiting {} pages to {}", pages.len(), config.max_pages);
        pages.truncate(config.max_pages);
    }

    let text_len: usize = pages.iter().map(|p| p.trim().len()).sum();
    if text_len < config.min_text_length {
        return Err(PdfError::TextExtraction(format!(
            "{} has no extractable text; scanned documents need OCR first",
            path.display()
        ))
        .into());
    }

    debug!("Read {} pages ({} chars) from {}", pages.len(), text_len, path.display());
    Ok(pages)
}
