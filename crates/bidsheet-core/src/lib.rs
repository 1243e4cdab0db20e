//! Core library for bid sheet line-item extraction.
//!
//! This crate provides:
//! - Per-page PDF text extraction
//! - The line-item parser (field decomposition and page scanning)
//! - Report rendering (CSV, JSON, plain-text table)
//! - Pipeline configuration

pub mod error;
pub mod models;
pub mod parser;
pub mod pdf;
pub mod report;

pub use error::{BidsheetError, PdfError, ReportError, Result};
pub use models::config::BidsheetConfig;
pub use models::line_item::{FieldParseStatus, LineItem};
pub use parser::{Decomposition, FieldDecomposer, PageScanner, Rejection, ScanReport, TableMarkers};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{render, ReportFormat, COLUMN_HEADERS};
