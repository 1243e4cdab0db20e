//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

/// Main configuration for the bidsheet pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BidsheetConfig {
    /// Page scanner configuration.
    pub scanner: ScannerConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Report output configuration.
    pub output: OutputConfig,
}

/// Page scanner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Substring marking the item table header. The line holding it is skipped.
    pub start_marker: String,

    /// Substrings that end the item table on a page.
    pub end_markers: Vec<String>,

    /// Inserted between a description and each continuation line.
    pub continuation_separator: String,

    /// Accept units of measure printed as their own field.
    pub detached_units: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            start_marker: "ORDER QTY".to_string(),
            end_markers: vec![
                "** Continued".to_string(),
                "The pricing on this bid".to_string(),
            ],
            continuation_separator: "\n".to_string(),
            detached_units: true,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to scan (0 = unlimited).
    pub max_pages: usize,

    /// Below this many characters of extracted text the document is
    /// reported as having no text layer.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 1,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format used when none is given on the command line.
    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Csv,
        }
    }
}

impl BidsheetConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = BidsheetConfig::default();
        assert_eq!(config.scanner.start_marker, "ORDER QTY");
        assert_eq!(config.scanner.end_markers.len(), 2);
        assert!(config.scanner.detached_units);
        assert_eq!(config.output.format, ReportFormat::Csv);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{ "scanner": { "start_marker": "QTY ORDERED" }, "output": { "format": "json" } }"#;
        let config: BidsheetConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.scanner.start_marker, "QTY ORDERED");
        assert_eq!(config.scanner.continuation_separator, "\n");
        assert_eq!(config.scanner.end_markers[0], "** Continued");
        assert_eq!(config.pdf.max_pages, 0);
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = BidsheetConfig::default();
        config.scanner.end_markers = vec!["Subtotal".to_string()];
        config.save(&path).unwrap();

        let loaded = BidsheetConfig::from_file(&path).unwrap();
        assert_eq!(loaded.scanner.end_markers, vec!["Subtotal".to_string()]);
    }
}
