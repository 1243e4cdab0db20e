//! Page scanner: finds the item table on a page and folds its lines into
//! line items.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::models::config::ScannerConfig;
use crate::models::line_item::LineItem;

use super::fields::{Decomposition, FieldDecomposer};

/// Substrings bounding the item table on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMarkers {
    /// Contained in the table header line.
    pub start: String,
    /// Any of these ends the table.
    pub end: Vec<String>,
}

impl TableMarkers {
    pub fn new(start: impl Into<String>, end: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            start: start.into(),
            end: end.into_iter().map(Into::into).collect(),
        }
    }

    fn is_start(&self, line: &str) -> bool {
        line.contains(self.start.as_str())
    }

    fn is_end(&self, line: &str) -> bool {
        self.end
            .iter()
            .any(|marker| !marker.is_empty() && line.contains(marker.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    BeforeTable,
    InTable,
}

/// Result of scanning one page.
#[derive(Debug, Clone, Default)]
pub struct PageScan {
    /// Items in source line order.
    pub items: Vec<LineItem>,
    /// A table header was seen.
    pub table_found: bool,
    /// The scan stopped at an end marker rather than the end of the page.
    pub ended_by_marker: bool,
    /// Lines appended to an earlier item's description.
    pub continuation_lines: usize,
    /// Non-item lines seen before any item on the page.
    pub dropped_lines: usize,
}

/// Result of scanning a whole document.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// All items, pages concatenated in order.
    pub items: Vec<LineItem>,
    /// Number of pages scanned.
    pub page_count: usize,
    /// 1-indexed pages on which a table header was found.
    pub table_pages: Vec<usize>,
    /// Lines folded into descriptions across the document.
    pub continuation_lines: usize,
    /// Lines dropped across the document.
    pub dropped_lines: usize,
    /// Scan warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Scans pages of extracted text for line items.
#[derive(Debug, Clone)]
pub struct PageScanner {
    markers: TableMarkers,
    decomposer: FieldDecomposer,
    continuation_separator: String,
}

impl PageScanner {
    /// Create a scanner with the default markers and a `\n` separator.
    pub fn new() -> Self {
        Self::from_config(&ScannerConfig::default())
    }

    /// Create a scanner from configuration.
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self {
            markers: TableMarkers::new(config.start_marker.clone(), config.end_markers.clone()),
            decomposer: FieldDecomposer::new().with_detached_units(config.detached_units),
            continuation_separator: config.continuation_separator.clone(),
        }
    }

    /// Set the table markers.
    pub fn with_markers(mut self, markers: TableMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Set the separator placed before each continuation line.
    pub fn with_continuation_separator(mut self, separator: impl Into<String>) -> Self {
        self.continuation_separator = separator.into();
        self
    }

    /// Set detached unit detection on the field decomposer.
    pub fn with_detached_units(mut self, enabled: bool) -> Self {
        self.decomposer = self.decomposer.with_detached_units(enabled);
        self
    }

    /// Scan one page and return its items.
    pub fn scan_page(&self, page_text: &str) -> Vec<LineItem> {
        self.scan_page_detailed(page_text).items
    }

    /// Scan one page, keeping the bookkeeping.
    pub fn scan_page_detailed(&self, page_text: &str) -> PageScan {
        let mut scan = PageScan::default();
        let mut state = TableState::BeforeTable;
        // Index of the most recent item in `scan.items`.
        let mut last: Option<usize> = None;

        for line in page_text.lines() {
            if state == TableState::BeforeTable {
                if self.markers.is_start(line) {
                    state = TableState::InTable;
                    scan.table_found = true;
                }
                continue;
            }

            if self.markers.is_end(line) {
                scan.ended_by_marker = true;
                break;
            }

            match self.decomposer.decompose(line) {
                Decomposition::Item(item) => {
                    scan.items.push(item);
                    last = Some(scan.items.len() - 1);
                }
                Decomposition::NotAnItem(reason) => match last {
                    Some(idx) => {
                        scan.items[idx].append_description(line, &self.continuation_separator);
                        scan.continuation_lines += 1;
                    }
                    None => {
                        trace!("Dropped line before first item ({:?}): {}", reason, line);
                        scan.dropped_lines += 1;
                    }
                },
            }
        }

        debug!(
            "Page scan: table_found={}, {} items, {} continuation lines, {} dropped",
            scan.table_found,
            scan.items.len(),
            scan.continuation_lines,
            scan.dropped_lines
        );

        scan
    }

    /// Scan pages in order and concatenate their items.
    pub fn scan_pages<I, S>(&self, pages: I) -> Vec<LineItem>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        pages
            .into_iter()
            .flat_map(|page| self.scan_page(page.as_ref()))
            .collect()
    }

    /// Scan pages in order and report on the whole document.
    pub fn scan_document<I, S>(&self, pages: I) -> ScanReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut report = ScanReport {
            items: Vec::new(),
            page_count: 0,
            table_pages: Vec::new(),
            continuation_lines: 0,
            dropped_lines: 0,
            warnings: Vec::new(),
            processing_time_ms: 0,
        };

        for (idx, page) in pages.into_iter().enumerate() {
            let page_number = idx + 1;
            let scan = self.scan_page_detailed(page.as_ref());

            report.page_count += 1;
            if scan.table_found {
                report.table_pages.push(page_number);
            }
            report.continuation_lines += scan.continuation_lines;
            report.dropped_lines += scan.dropped_lines;
            report.items.extend(scan.items);
        }

        if report.table_pages.is_empty() {
            report.warnings.push(format!(
                "No page contains the table header {:?}",
                self.markers.start
            ));
        } else if report.items.is_empty() {
            report.warnings.push("Table header found but no line items recovered".to_string());
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Scanned {} pages: {} items from {} table pages in {}ms",
            report.page_count,
            report.items.len(),
            report.table_pages.len(),
            report.processing_time_ms
        );

        report
    }
}

impl Default for PageScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ITEM: &str = "5 EA 10023 Widget Assembly 12.50 EA 62.50";

    fn page(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_single_item_stops_at_continued_marker() {
        let text = page(&["ORDER QTY", ITEM, "** Continued", "1EA 2 Late item 1.00/EA 1.00"]);
        let items = PageScanner::new().scan_page(&text);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.quantity, 5);
        assert_eq!(item.quantity_unit, "EA");
        assert_eq!(item.part_number, "10023");
        assert_eq!(item.description, "Widget Assembly");
        assert_eq!(item.unit_price, 12.50);
        assert_eq!(item.price_unit, "EA");
        assert_eq!(item.extended_total, 62.50);
    }

    #[test]
    fn test_short_uppercase_part_number() {
        let text = page(&["ORDER QTY", "10 ABC Widget Bracket 1.00 10.00"]);
        let items = PageScanner::new().scan_page(&text);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity_unit, "");
        assert_eq!(items[0].part_number, "ABC");
        assert_eq!(items[0].description, "Widget Bracket");
    }

    #[test]
    fn test_line_before_first_item_is_dropped() {
        let text = page(&["ORDER QTY", "additional notes about the part"]);
        let scan = PageScanner::new().scan_page_detailed(&text);

        assert!(scan.items.is_empty());
        assert!(scan.table_found);
        assert_eq!(scan.dropped_lines, 1);
    }

    #[test]
    fn test_long_text_line_is_folded() {
        let text = page(&["ORDER QTY", ITEM, "supplied with mounting kit and hardware"]);
        let items = PageScanner::new().scan_page(&text);

        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].description,
            "Widget Assembly\nsupplied with mounting kit and hardware"
        );
    }

    #[test]
    fn test_short_lines_are_folded() {
        let text = page(&[
            "header junk",
            "  ORDER QTY  PART  DESCRIPTION  PRICE  EXT",
            "2EA 881 Hex Nut 0.40/EA 0.80",
            "zinc plated",
            "grade 5",
            "1BX 990 Washers 3.00/BX 3.00",
        ]);
        let items = PageScanner::new().scan_page(&text);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "Hex Nut\nzinc plated\ngrade 5");
        assert_eq!(items[1].description, "Washers");
    }

    #[test]
    fn test_no_start_marker() {
        let text = page(&[ITEM, "2EA 881 Hex Nut 0.40/EA 0.80", "** Continued"]);
        let scan = PageScanner::new().scan_page_detailed(&text);

        assert!(scan.items.is_empty());
        assert!(!scan.table_found);
    }

    #[test]
    fn test_two_pages_keep_order() {
        let pages = [
            page(&["ORDER QTY", "1EA A1 First 1.00/EA 1.00"]),
            page(&["ORDER QTY", "2EA B2 Second 2.00/EA 4.00"]),
        ];
        let items = PageScanner::new().scan_pages(&pages);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].part_number, "A1");
        assert_eq!(items[1].part_number, "B2");
    }

    #[test]
    fn test_state_resets_per_page() {
        // Page 2 has no header, and its text must not fold into page 1's item.
        let pages = [
            page(&["ORDER QTY", "1EA A1 First 1.00/EA 1.00"]),
            page(&["trailing words on page two", "3EA C3 Third 1.00/EA 3.00"]),
        ];
        let items = PageScanner::new().scan_pages(&pages);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "First");
    }

    #[test]
    fn test_empty_page() {
        let scanner = PageScanner::new();
        assert!(scanner.scan_page("").is_empty());
        assert!(scanner.scan_pages(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_end_marker_before_table_is_ignored() {
        let text = page(&["** Continued from page 1", "ORDER QTY", ITEM]);
        let items = PageScanner::new().scan_page(&text);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_pricing_notice_ends_table() {
        let text = page(&[
            "ORDER QTY",
            ITEM,
            "The pricing on this bid is valid for 30 days",
            "9EA 999 Never seen 1.00/EA 9.00",
        ]);
        let scan = PageScanner::new().scan_page_detailed(&text);

        assert_eq!(scan.items.len(), 1);
        assert!(scan.ended_by_marker);
    }

    #[test]
    fn test_crlf_lines() {
        let text = "ORDER QTY\r\n2EA 881 Hex Nut 0.40/EA 0.80\r\nzinc plated\r\n";
        let items = PageScanner::new().scan_page(text);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].extended_total, 0.8);
        assert_eq!(items[0].description, "Hex Nut\nzinc plated");
    }

    #[test]
    fn test_custom_markers_and_separator() {
        let scanner = PageScanner::new()
            .with_markers(TableMarkers::new("QTY ORDERED", ["Subtotal"]))
            .with_continuation_separator("\r\n");
        let text = page(&[
            "ORDER QTY",
            "QTY ORDERED",
            "2EA 881 Hex Nut 0.40/EA 0.80",
            "zinc plated",
            "Subtotal 0.80",
            "1EA 1 x 1.00/EA 1.00",
        ]);
        let items = scanner.scan_page(&text);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Hex Nut\r\nzinc plated");
    }

    #[test]
    fn test_repeated_header_inside_table_is_folded() {
        let text = page(&["ORDER QTY", ITEM, "ORDER QTY PART"]);
        let items = PageScanner::new().scan_page(&text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Widget Assembly\nORDER QTY PART");
    }

    #[test]
    fn test_scan_document_report() {
        let pages = vec![
            page(&["cover letter"]),
            page(&["ORDER QTY", ITEM, "see drawing", "** Continued"]),
            page(&["ORDER QTY", "stray note", "2EA 881 Hex Nut 0.40/EA 0.80"]),
        ];
        let report = PageScanner::new().scan_document(&pages);

        assert_eq!(report.page_count, 3);
        assert_eq!(report.table_pages, vec![2, 3]);
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.continuation_lines, 1);
        assert_eq!(report.dropped_lines, 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_scan_document_warns_without_header() {
        let report = PageScanner::new().scan_document(["no table here"]);
        assert!(report.items.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }
}
