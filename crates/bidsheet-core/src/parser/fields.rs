//! Field decomposition of a single bid sheet line.
//!
//! An item line has the shape
//!
//! ```text
//! <qty><qty unit> <part number> <description ...> <price><sep><price unit> <total>
//! 5EA 10023 Widget Assembly 12.50/EA 62.50
//! ```
//!
//! Fields are separated by single spaces. The description may contain spaces,
//! so it is cut out of the line by offset instead of being re-joined.

use tracing::trace;

use crate::models::line_item::{FieldParseStatus, LineItem};

use super::numeric::{
    is_bare_integer, is_unit_token, numeric_prefix_len, parse_price, parse_quantity,
    parse_total, strip_non_numeric,
};

/// Lines with fewer fields are never item lines.
pub const MIN_FIELDS: usize = 5;

/// Outcome of decomposing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Decomposition {
    /// The line is a well-formed item line.
    Item(LineItem),
    /// The line is not an item line; callers treat it as continuation text.
    NotAnItem(Rejection),
}

impl Decomposition {
    /// The item, if the line was one.
    pub fn into_item(self) -> Option<LineItem> {
        match self {
            Decomposition::Item(item) => Some(item),
            Decomposition::NotAnItem(_) => None,
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Decomposition::Item(_))
    }
}

/// Why a line was not accepted as an item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than [`MIN_FIELDS`] fields.
    TooFewFields { found: usize },

    /// The total read as exactly zero. `parsed` is true when the field was a
    /// genuine zero amount and false when it was not a number at all.
    ZeroTotal { parsed: bool },

    /// The description field held no part number.
    MissingPartNumber,
}

/// Splits item lines into their fields.
#[derive(Debug, Clone)]
pub struct FieldDecomposer {
    /// Accept `5 EA` and `12.50 EA` in place of `5EA` and `12.50/EA`.
    detached_units: bool,
}

/// Field indices of one line after unit detection.
struct Layout {
    /// First description field.
    desc_start: usize,
    /// One past the last description field; also the price field index.
    desc_end: usize,
    qty_unit: Option<usize>,
    price_unit: Option<usize>,
}

impl FieldDecomposer {
    /// Create a decomposer with detached unit detection enabled.
    pub fn new() -> Self {
        Self {
            detached_units: true,
        }
    }

    /// Set detached unit detection.
    pub fn with_detached_units(mut self, enabled: bool) -> Self {
        self.detached_units = enabled;
        self
    }

    /// Decompose `line` into a [`LineItem`], or say why it is not one.
    pub fn decompose(&self, line: &str) -> Decomposition {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() < MIN_FIELDS {
            return Decomposition::NotAnItem(Rejection::TooFewFields {
                found: fields.len(),
            });
        }

        let layout = self.layout(&fields);
        let total_field = fields[fields.len() - 1];
        let price_field = fields[layout.desc_end];

        let total = parse_total(total_field);
        if total.value == 0.0 {
            trace!("Rejected line with zero total {:?}: {}", total_field, line);
            return Decomposition::NotAnItem(Rejection::ZeroTotal { parsed: total.ok });
        }

        let desc_from = field_offset(&fields, layout.desc_start);
        let desc_to = field_offset(&fields, layout.desc_end).saturating_sub(1);
        let description_field = line.get(desc_from..desc_to).unwrap_or("").trim_matches(' ');

        let (part_number, description) = match description_field.split_once(' ') {
            Some((part, rest)) => (part, rest),
            None => (description_field, ""),
        };
        if part_number.is_empty() {
            return Decomposition::NotAnItem(Rejection::MissingPartNumber);
        }

        let qty_field = fields[0];
        let quantity = parse_quantity(qty_field);
        let quantity_unit = match layout.qty_unit {
            Some(idx) => fields[idx],
            None => qty_field.get(numeric_prefix_len(qty_field)..).unwrap_or(""),
        };

        let price = parse_price(price_field);
        let price_unit = match layout.price_unit {
            Some(idx) => fields[idx],
            None => {
                // One separator character sits between the amount and the unit.
                let skip = strip_non_numeric(price_field).len() + 1;
                price_field.get(skip..).unwrap_or("")
            }
        };

        Decomposition::Item(LineItem {
            quantity: quantity.value,
            quantity_unit: quantity_unit.to_string(),
            part_number: part_number.to_string(),
            description: description.to_string(),
            unit_price: price.value,
            price_unit: price_unit.to_string(),
            extended_total: total.value,
            parse_status: FieldParseStatus {
                quantity: quantity.ok,
                unit_price: price.ok,
            },
        })
    }

    fn layout(&self, fields: &[&str]) -> Layout {
        let last = fields.len() - 1;
        let mut layout = Layout {
            desc_start: 1,
            desc_end: last - 1,
            qty_unit: None,
            price_unit: None,
        };

        if !self.detached_units {
            return layout;
        }

        // Units are detached on both sides or not at all; a lone short code
        // after the quantity is a part number.
        let price_candidate = last - 2;
        if is_bare_integer(fields[0])
            && is_unit_token(fields[1])
            && is_unit_token(fields[last - 1])
            && is_bare_amount(fields[price_candidate])
            && price_candidate > 2
        {
            layout.qty_unit = Some(1);
            layout.desc_start = 2;
            layout.price_unit = Some(last - 1);
            layout.desc_end = price_candidate;
        }

        layout
    }
}

impl Default for FieldDecomposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of `fields[index]` within the line it was split from.
fn field_offset(fields: &[&str], index: usize) -> usize {
    fields[..index].iter().map(|f| f.len() + 1).sum()
}

/// Digits with at most one decimal point, e.g. `12.50`.
fn is_bare_amount(field: &str) -> bool {
    numeric_prefix_len(field) == field.len() && parse_price(field).ok
}
