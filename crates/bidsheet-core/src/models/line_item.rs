//! Line-item record recovered from a bid sheet table.

use serde::{Deserialize, Serialize};

/// A single line item from a bid sheet.
///
/// Every field is always populated. Numbers that failed to parse hold zero and
/// the failure is recorded in [`LineItem::parse_status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Ordered quantity.
    pub quantity: u32,

    /// Unit of measure for the quantity (e.g. `EA`), possibly empty.
    pub quantity_unit: String,

    /// Part number, the first token of the description field.
    pub part_number: String,

    /// Free-text description. Continuation lines are appended to it.
    pub description: String,

    /// Price per price unit.
    pub unit_price: f64,

    /// Unit of measure the price is quoted in, possibly empty.
    pub price_unit: String,

    /// Extended (line) total.
    pub extended_total: f64,

    /// Which numeric fields parsed cleanly.
    #[serde(skip)]
    pub parse_status: FieldParseStatus,
}

/// Parse success flags for the numeric fields of a [`LineItem`].
///
/// The extended total has no flag: a total that fails to parse reads as zero,
/// and a zero total rejects the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldParseStatus {
    pub quantity: bool,
    pub unit_price: bool,
}

impl Default for FieldParseStatus {
    fn default() -> Self {
        Self {
            quantity: true,
            unit_price: true,
        }
    }
}

impl FieldParseStatus {
    /// True when both flagged fields parsed.
    pub fn is_clean(&self) -> bool {
        self.quantity && self.unit_price
    }
}

impl LineItem {
    /// Append a continuation line to the description.
    pub fn append_description(&mut self, line: &str, separator: &str) {
        self.description.push_str(separator);
        self.description.push_str(line);
    }
}
