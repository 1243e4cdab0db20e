//! Error types for the bidsheet-core library.
//!
//! The line-item parser itself never fails; these types cover the
//! collaborators around it (PDF text extraction, report rendering, config).

use thiserror::Error;

/// Main error type for the bidsheet library.
#[derive(Error, Debug)]
pub enum BidsheetError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report rendering error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to rendering a line-item report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendered bytes were not valid UTF-8.
    #[error("invalid UTF-8 in rendered report: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The CSV writer could not hand back its buffer.
    #[error("failed to flush CSV buffer: {0}")]
    Flush(String),
}

/// Result type for the bidsheet library.
pub type Result<T> = std::result::Result<T, BidsheetError>;
