// ABOUTME: Currency amount normalization to plain decimals.
// ABOUTME: Strips currency markers and resolves comma/dot separator conventions.

//! Amount normalization.
//!
//! Order pages print amounts as "£15.09", "EUR 8,99", "-$4.99", or
//! "1.234,56" depending on the storefront. Downstream arithmetic wants a
//! plain decimal. The normalizer strips currency markers, resolves the
//! separator convention, and keeps an explicit minus sign. Text with no
//! usable number in it, like "N/A", is a loud error rather than a zero;
//! zero is a real amount and must stay distinguishable from absence.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::NormalizeError;

const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];
const CURRENCY_CODES: [&str; 3] = ["USD", "GBP", "EUR"];

// Integer with comma thousands groups, like "1,234" or "12,345,678".
static COMMA_GROUPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(?:,\d{3})+$").unwrap());

// Integer with dot thousands groups, like "1.234.567".
static DOT_GROUPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(?:\.\d{3})+$").unwrap());

fn amount_error(input: &str) -> NormalizeError {
    NormalizeError::Amount {
        input: input.to_string(),
    }
}

/// Strips currency symbols and codes from both ends and records whether an
/// explicit minus sign was present.
fn strip_currency(mut s: &str) -> (&str, bool) {
    let mut negative = false;
    loop {
        let t = s.trim_start();
        if let Some(rest) = t.strip_prefix('-') {
            negative = true;
            s = rest;
            continue;
        }
        if let Some(c) = t.chars().next() {
            if CURRENCY_SYMBOLS.contains(&c) {
                s = &t[c.len_utf8()..];
                continue;
            }
        }
        let mut stripped = false;
        for code in CURRENCY_CODES {
            if let Some(rest) = t.strip_prefix(code) {
                s = rest;
                stripped = true;
                break;
            }
        }
        if stripped {
            continue;
        }
        s = t;
        break;
    }
    loop {
        let t = s.trim_end();
        if let Some(c) = t.chars().next_back() {
            if CURRENCY_SYMBOLS.contains(&c) {
                s = &t[..t.len() - c.len_utf8()];
                continue;
            }
        }
        let mut stripped = false;
        for code in CURRENCY_CODES {
            if let Some(rest) = t.strip_suffix(code) {
                s = rest;
                stripped = true;
                break;
            }
        }
        if stripped {
            continue;
        }
        s = t;
        break;
    }
    (s, negative)
}

/// Normalizes a raw amount string to a decimal.
///
/// Accepted input is an optional minus sign, optional currency symbol
/// ($, £, €) or code (USD, GBP, EUR) on either end, and digits with
/// comma, dot, or space separators in any one storefront convention.
/// Separator rules:
///
/// - Both comma and dot present: the one further right is the decimal
///   separator, the other marks thousands.
/// - Comma only: thousands when the digits group as `1,234`-style
///   triples, otherwise a decimal comma.
/// - Dot only: a decimal point, unless repeated dots form `1.234.567`
///   thousands groups.
///
/// Anything else, including "N/A" and the empty string, is a
/// [`NormalizeError::Amount`] carrying the original input.
pub fn normalize_amount(raw: &str) -> Result<Decimal, NormalizeError> {
    let (body, negative) = strip_currency(raw.trim());
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if body.is_empty() {
        return Err(amount_error(raw));
    }
    if body
        .chars()
        .any(|c| !c.is_ascii_digit() && c != ',' && c != '.')
    {
        return Err(amount_error(raw));
    }

    let normalized = match (body.rfind(','), body.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => {
            body.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => body.replace(',', ""),
        (Some(_), None) => {
            if COMMA_GROUPED.is_match(&body) {
                body.replace(',', "")
            } else if body.matches(',').count() == 1 {
                body.replace(',', ".")
            } else {
                return Err(amount_error(raw));
            }
        }
        (None, Some(_)) => {
            if body.matches('.').count() > 1 {
                if DOT_GROUPED.is_match(&body) {
                    body.replace('.', "")
                } else {
                    return Err(amount_error(raw));
                }
            } else {
                body
            }
        }
        (None, None) => body,
    };

    let value = Decimal::from_str(&normalized).map_err(|_| amount_error(raw))?;
    Ok(if negative { -value } else { value })
}
