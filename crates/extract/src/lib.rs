// ABOUTME: Main library entry point for the azorder field extraction engine.
// ABOUTME: Re-exports the public API: field tables, extraction, dom access, normalizers, errors.

//! azorder-extract - Field extraction for Amazon order history pages.
//!
//! This crate turns already-parsed order pages into field values: each
//! field is an ordered chain of XPath locators with an optional regex
//! capture and a default, and raw values can be normalized into ISO-8601
//! dates or plain decimal amounts. Parsing and fetching stay outside;
//! callers hand in a document and a validated field table.
//!
//! # Example
//!
//! ```
//! use azorder_extract::{extract_field, FieldTable, XmlDom, XpathDom};
//!
//! let page = r#"<html><body>
//!   <div id="od-subtotals">
//!     <div class="a-row">
//!       <div class="a-column"><span>VAT:</span></div>
//!       <div class="a-column"><span>£0.90</span></div>
//!     </div>
//!   </div>
//! </body></html>"#;
//!
//! let table = FieldTable::from_json(
//!     r#"[{
//!         "name": "vat",
//!         "locators": ["//div[@id='od-subtotals']//div[div/span[contains(text(),'VAT')]]"],
//!         "pattern": "VAT: *[^0-9-]*(-?[0-9][0-9.,]*)",
//!         "default": "N/A"
//!     }]"#,
//! )
//! .unwrap()
//! .validate()
//! .unwrap();
//!
//! let package = sxd_document::parser::parse(page).unwrap();
//! let dom = XmlDom::new(package.as_document());
//! let vat = extract_field(&dom, dom.root(), table.get("vat").unwrap());
//! assert_eq!(vat, "0.90");
//! ```

pub mod dom;
pub mod error;
pub mod extractors;
pub mod normalize;

pub use crate::dom::xml::{validate_xpath, XmlDom};
pub use crate::dom::XpathDom;
pub use crate::error::{NormalizeError, SpecError, XpathError};
pub use crate::extractors::capture::CapturePattern;
pub use crate::extractors::loader::builtin_order_fields;
pub use crate::extractors::select::{extract_all, extract_field, extract_first_text};
pub use crate::extractors::spec::{CompiledField, CompiledTable, FieldKind, FieldSpec, FieldTable};
pub use crate::normalize::amount::normalize_amount;
pub use crate::normalize::date::{normalize_date, normalize_date_any, Locale};
