// ABOUTME: Normalizers that turn raw extracted text into canonical values.
// ABOUTME: Dates become ISO-8601 strings, amounts become decimals.

//! Normalization module.
//!
//! Extraction hands over raw page text; these modules turn it into values
//! that are safe to compare and sum. Failures here are loud: by the time
//! text reaches a normalizer it was found on the page, and silently
//! passing it through would corrupt downstream records.
//!
//! Submodules:
//! - `date`: locale-aware month-name dates to `YYYY-MM-DD`.
//! - `amount`: currency strings to [`rust_decimal::Decimal`].

pub mod amount;
pub mod date;
