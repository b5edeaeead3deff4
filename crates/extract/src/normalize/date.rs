// ABOUTME: Locale-aware date normalization for human-readable order dates.
// ABOUTME: Maps "29 mai 2018" style strings onto ISO-8601 via month-name tables.

//! Date normalization.
//!
//! Order pages print dates the way a person reads them: "October 14,
//! 2016", "29 mai 2018", "29. Dezember 2017". Downstream everything wants
//! ISO-8601. Each supported locale carries its own month-name table, so
//! the result never depends on the process environment: the same input
//! and locale give the same output on every machine.
//!
//! Input that does not parse is an error, never echoed back unchanged. An
//! unparsed date that leaks into records as if it were canonical is much
//! harder to notice than a reported failure.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::error::NormalizeError;

const EN_MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

const FR_MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("février", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("août", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("décembre", 12),
    // Abbreviated forms as printed, period included.
    ("janv.", 1),
    ("févr.", 2),
    ("avr.", 4),
    ("juil.", 7),
    ("sept.", 9),
    ("oct.", 10),
    ("nov.", 11),
    ("déc.", 12),
];

const DE_MONTHS: &[(&str, u32)] = &[
    ("januar", 1),
    ("februar", 2),
    ("märz", 3),
    ("april", 4),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("august", 8),
    ("september", 9),
    ("oktober", 10),
    ("november", 11),
    ("dezember", 12),
];

const IT_MONTHS: &[(&str, u32)] = &[
    ("gennaio", 1),
    ("febbraio", 2),
    ("marzo", 3),
    ("aprile", 4),
    ("maggio", 5),
    ("giugno", 6),
    ("luglio", 7),
    ("agosto", 8),
    ("settembre", 9),
    ("ottobre", 10),
    ("novembre", 11),
    ("dicembre", 12),
];

const ES_MONTHS: &[(&str, u32)] = &[
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

// "29 mai 2018", "29. Dezember 2017", "4 March 2018"
static DAY_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.?\s+(\p{Alphabetic}+\.?)\s+(\d{4})$").unwrap());

// "October 14, 2016"
static MONTH_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\p{Alphabetic}+\.?)\s+(\d{1,2}),?\s+(\d{4})$").unwrap());

// "16 de noviembre de 2018", connectives optional
static DAY_FIRST_ES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\.?\s+(?:de\s+)?(\p{Alphabetic}+\.?)\s+(?:de\s+)?(\d{4})$").unwrap()
});

/// A locale the date normalizer has month names for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Fr,
    De,
    It,
    Es,
}

impl Locale {
    /// Every supported locale, in the order [`normalize_date_any`] tries
    /// them.
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Fr, Locale::De, Locale::It, Locale::Es];

    /// The two-letter code, as used in field tables and on the command
    /// line.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::It => "it",
            Locale::Es => "es",
        }
    }

    fn months(self) -> &'static [(&'static str, u32)] {
        match self {
            Locale::En => EN_MONTHS,
            Locale::Fr => FR_MONTHS,
            Locale::De => DE_MONTHS,
            Locale::It => IT_MONTHS,
            Locale::Es => ES_MONTHS,
        }
    }

    fn month_number(self, name: &str) -> Option<u32> {
        let lowered = name.to_lowercase();
        self.months()
            .iter()
            .find(|(month, _)| *month == lowered)
            .map(|(_, number)| *number)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for locale codes outside the supported set.
#[derive(Debug, Error)]
#[error("unknown locale {0:?} (expected one of en, fr, de, it, es)")]
pub struct UnknownLocaleError(String);

impl FromStr for Locale {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            "de" => Ok(Locale::De),
            "it" => Ok(Locale::It),
            "es" => Ok(Locale::Es),
            _ => Err(UnknownLocaleError(s.to_string())),
        }
    }
}

/// Splits an input into (month name, day, year) according to the locale's
/// usual word order.
fn date_parts(input: &str, locale: Locale) -> Option<(String, u32, i32)> {
    if locale == Locale::En {
        if let Some(caps) = MONTH_FIRST.captures(input) {
            let month = caps[1].to_string();
            let day = caps[2].parse().ok()?;
            let year = caps[3].parse().ok()?;
            return Some((month, day, year));
        }
    }
    let shape = if locale == Locale::Es {
        &DAY_FIRST_ES
    } else {
        &DAY_FIRST
    };
    let caps = shape.captures(input)?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].to_string();
    let year = caps[3].parse().ok()?;
    Some((month, day, year))
}

/// Normalizes a human-readable date in the given locale to `YYYY-MM-DD`.
///
/// The input must be a day, a month name from the locale's table, and a
/// four-digit year, in the locale's usual order: "October 14, 2016" or
/// "15 July 2018" for `en`, "29 mai 2018" for `fr`, "29. Dezember 2017"
/// for `de`. Month-name matching ignores case. Days may carry a trailing
/// period, as German and Italian pages print them.
pub fn normalize_date(input: &str, locale: Locale) -> Result<String, NormalizeError> {
    let trimmed = input.trim();
    let format_error = || NormalizeError::DateFormat {
        input: input.to_string(),
        locale,
    };

    let (month_name, day, year) = date_parts(trimmed, locale).ok_or_else(format_error)?;
    let month = locale.month_number(&month_name).ok_or_else(format_error)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        NormalizeError::DateImpossible {
            input: input.to_string(),
        }
    })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Tries every locale in [`Locale::ALL`] order and returns the first that
/// understands the input.
///
/// Month names shared across locales ("mai", "agosto", "april") agree on
/// the month number, so the scan order never changes the value, only
/// which locale gets credit.
pub fn normalize_date_any(input: &str) -> Result<String, NormalizeError> {
    for locale in Locale::ALL {
        if let Ok(formatted) = normalize_date(input, locale) {
            return Ok(formatted);
        }
    }
    Err(NormalizeError::DateUnrecognized {
        input: input.to_string(),
    })
}
