//! Page scanning scenarios through the public API.

use bidsheet_core::parser::{PageScanner, TableMarkers};
use bidsheet_core::{render, ReportFormat};
use pretty_assertions::assert_eq;

fn page(lines: &[&str]) -> String {
    lines.join("\n")
}

#[test]
fn header_item_then_continued_marker() {
    let text = page(&[
        "ORDER QTY",
        "5 EA 10023 Widget Assembly 12.50 EA 62.50",
        "** Continued",
    ]);
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
fn note_without_prior_item_is_dropped() {
    let text = page(&["ORDER QTY", "additional notes about the part"]);
    assert!(PageScanner::new().scan_page(&text).is_empty());
}

#[test]
fn six_field_text_line_folds_into_item() {
    let text = page(&[
        "ORDER QTY",
        "5EA 10023 Widget Assembly 12.50/EA 62.50",
        "Ships with two mounting brackets included",
    ]);
    let items = PageScanner::new().scan_page(&text);

    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].description,
        "Widget Assembly\nShips with two mounting brackets included"
    );
}

#[test]
fn page_without_header_yields_nothing() {
    let text = page(&[
        "5EA 10023 Widget Assembly 12.50/EA 62.50",
        "2EA 881 Hex Nut 0.40/EA 0.80",
    ]);
    assert!(PageScanner::new().scan_page(&text).is_empty());
}

#[test]
fn two_pages_concatenate_in_order() {
    let pages = vec![
        page(&["ORDER QTY", "5EA 10023 Widget Assembly 12.50/EA 62.50"]),
        page(&["ORDER QTY", "2EA 881 Hex Nut 0.40/EA 0.80"]),
    ];
    let items = PageScanner::new().scan_pages(&pages);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].part_number, "10023");
    assert_eq!(items[1].part_number, "881");
}

#[test]
fn consumed_page_rescans_to_nothing() {
    let scanner = PageScanner::new();
    let text = page(&["ORDER QTY", "5EA 10023 Widget Assembly 12.50/EA 62.50"]);
    assert_eq!(scanner.scan_page(&text).len(), 1);

    let remaining = "";
    assert!(scanner.scan_page(remaining).is_empty());
    assert!(scanner.scan_page(remaining).is_empty());
}

#[test]
fn alternative_layout_markers() {
    let scanner = PageScanner::new()
        .with_markers(TableMarkers::new("Qty Part", ["Subtotal", "Terms:"]));
    let text = page(&[
        "Qty Part Description Unit Ext",
        "10FT CU-12 12 AWG copper 0.31/FT 3.10",
        "Terms: net 30",
        "1EA X late 1.00/EA 1.00",
    ]);
    let items = scanner.scan_page(&text);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].part_number, "CU-12");
    assert_eq!(items[0].description, "12 AWG copper");
}

#[test]
fn scanned_items_render_as_csv() {
    let text = page(&["ORDER QTY", "5EA 10023 Widget Assembly 12.50/EA 62.50"]);
    let items = PageScanner::new().scan_page(&text);
    let csv = render(&items, ReportFormat::Csv).unwrap();

    assert_eq!(
        csv,
        "Qty,UM,Part Number,Description,Price,UM,Ext Price\n\
         5,EA,10023,Widget Assembly,12.50,EA,62.50\n"
    );
}
