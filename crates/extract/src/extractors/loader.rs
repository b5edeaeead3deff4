// ABOUTME: Loader for the builtin order field table from embedded JSON data.
// ABOUTME: Provides builtin_order_fields() as the ready-to-use default table.

//! Builtin field table loader.
//!
//! The default table covers the fields an order history page carries:
//! order date, total, recipient, order id, and item listings on the list
//! page, and the od-subtotals money rows (VAT, Canadian GST and PST,
//! postage, gift, refund) plus payment rows on the detail page. Labels
//! come in English and French variants, expressed as fallback locators in
//! the chain.

use crate::extractors::spec::{CompiledTable, FieldTable};

/// Embedded JSON containing the builtin order field table.
const BUILTIN_ORDER_FIELDS_JSON: &str = include_str!("../../data/order_fields.json");

/// Loads and validates the builtin order field table.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or fails validation; the
/// builtin table is checked by tests, so this only fires on a broken
/// build.
pub fn builtin_order_fields() -> CompiledTable {
    FieldTable::from_json(BUILTIN_ORDER_FIELDS_JSON)
        .expect("failed to parse builtin order fields")
        .validate()
        .expect("builtin order fields failed validation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::spec::FieldKind;

    #[test]
    fn builtin_table_loads_and_validates() {
        let table = builtin_order_fields();
        assert!(!table.is_empty());
    }

    #[test]
    fn builtin_table_covers_list_and_detail_fields() {
        let table = builtin_order_fields();
        for name in [
            "order-date",
            "total",
            "recipient",
            "order-id",
            "items",
            "item-links",
            "vat",
            "gst",
            "pst",
            "postage",
            "gift",
            "refund",
            "payments",
        ] {
            assert!(table.get(name).is_some(), "{} field not found", name);
        }
    }

    #[test]
    fn builtin_vat_field_is_a_fallback_chain() {
        let table = builtin_order_fields();
        let vat = table.get("vat").unwrap();
        assert!(vat.locators().len() >= 4);
        assert!(vat.capture().is_some());
        assert_eq!(vat.default_value(), "N/A");
        assert_eq!(vat.kind(), FieldKind::Amount);
    }

    #[test]
    fn builtin_listing_fields_are_multi() {
        let table = builtin_order_fields();
        assert!(table.get("items").unwrap().multi());
        assert!(table.get("item-links").unwrap().multi());
        assert!(table.get("payments").unwrap().multi());
        assert!(!table.get("total").unwrap().multi());
    }
}
