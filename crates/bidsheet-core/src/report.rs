//! Report rendering for extracted line items.
//!
//! Every format carries the same seven columns in the same order:
//! Qty, UM, Part Number, Description, Price, UM, Ext Price.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::models::line_item::LineItem;

/// Column headers, in output order.
pub const COLUMN_HEADERS: [&str; 7] = [
    "Qty",
    "UM",
    "Part Number",
    "Description",
    "Price",
    "UM",
    "Ext Price",
];

/// Minimum text-table column widths.
const MIN_WIDTHS: [usize; 7] = [5, 3, 12, 30, 8, 3, 10];

/// Result type for rendering.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Comma-separated values, one row per item.
    Csv,
    /// JSON array of items.
    Json,
    /// Aligned plain-text table.
    Text,
}

impl ReportFormat {
    /// File extension for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

/// Render `items` in the given format.
pub fn render(items: &[LineItem], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Csv => render_csv(items),
        ReportFormat::Json => render_json(items),
        ReportFormat::Text => Ok(render_text(items)),
    }
}

fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn row(item: &LineItem) -> [String; 7] {
    [
        item.quantity.to_string(),
        item.quantity_unit.clone(),
        item.part_number.clone(),
        item.description.clone(),
        format_amount(item.unit_price),
        item.price_unit.clone(),
        format_amount(item.extended_total),
    ]
}

/// Render items as CSV with a header row.
pub fn render_csv(items: &[LineItem]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(COLUMN_HEADERS)?;
    for item in items {
        wtr.write_record(row(item))?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ReportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(data)?)
}

/// Render items as a pretty-printed JSON array.
pub fn render_json(items: &[LineItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Render items as an aligned text table.
///
/// Multi-line descriptions continue on following lines under the
/// Description column.
pub fn render_text(items: &[LineItem]) -> String {
    let rows: Vec<[String; 7]> = items.iter().map(row).collect();

    let mut widths = MIN_WIDTHS;
    for (i, header) in COLUMN_HEADERS.iter().enumerate() {
        widths[i] = widths[i].max(header.chars().count());
    }
    for cells in &rows {
        for (i, cell) in cells.iter().enumerate() {
            let longest = cell.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            widths[i] = widths[i].max(longest);
        }
    }

    let mut output = String::new();
    let headers = COLUMN_HEADERS.map(str::to_string);
    push_line(&mut output, &headers, &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    output.push_str(&"=".repeat(rule_len));
    output.push('\n');

    for cells in &rows {
        let mut description = cells[3].lines();
        let mut first = cells.clone();
        first[3] = description.next().unwrap_or("").to_string();
        push_line(&mut output, &first, &widths);

        for extra in description {
            let mut continuation: [String; 7] = Default::default();
            continuation[3] = extra.to_string();
            push_line(&mut output, &continuation, &widths);
        }
    }

    output
}

fn push_line(output: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths[i];
        // Qty, Price and Ext Price are right-aligned.
        match i {
            0 | 4 | 6 => line.push_str(&format!("{:>width$}", cell, width = width)),
            _ => line.push_str(&format!("{:<width$}", cell, width = width)),
        }
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
