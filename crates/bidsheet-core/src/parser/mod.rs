//! Line-item text parser.
//!
//! [`FieldDecomposer`] turns one line into a [`LineItem`](crate::LineItem);
//! [`PageScanner`] walks the lines of a page, bounds the item table with
//! start/end markers, and folds non-item lines into the preceding item's
//! description. Neither ever fails: malformed input degrades to fewer items.

pub mod fields;
pub mod numeric;
mod scanner;

pub use fields::{Decomposition, FieldDecomposer, Rejection, MIN_FIELDS};
pub use numeric::Parsed;
pub use scanner::{PageScan, PageScanner, ScanReport, TableMarkers};
