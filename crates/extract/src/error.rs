// ABOUTME: Error types for field extraction including SpecError, XpathError, and NormalizeError.
// ABOUTME: Separates fatal configuration problems from recoverable per-page failures.

use thiserror::Error;

use crate::normalize::date::Locale;

/// Errors raised while validating a field table.
///
/// Any of these means the configuration itself is broken and no page should
/// be processed with it. They are reported once, at load time, with the name
/// of the offending field.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A locator is not a parseable XPath expression.
    #[error("field {field:?}: invalid locator {expr:?}: {source}")]
    Locator {
        field: String,
        expr: String,
        #[source]
        source: XpathError,
    },

    /// A capture pattern is not a valid regular expression.
    #[error("field {field:?}: invalid capture pattern {pattern:?}: {source}")]
    Pattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A capture pattern has the wrong number of capture groups.
    #[error(
        "field {field:?}: capture pattern {pattern:?} must have exactly one capture group, found {found}"
    )]
    CaptureGroups {
        field: String,
        pattern: String,
        found: usize,
    },

    /// A field names a locale the date normalizer does not know.
    #[error("field {field:?}: unknown locale {locale:?}")]
    Locale { field: String, locale: String },

    /// The field table JSON could not be deserialized.
    #[error("failed to parse field table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from compiling or evaluating a single XPath expression.
#[derive(Debug, Error)]
pub enum XpathError {
    /// The expression does not parse.
    #[error("invalid XPath {expr:?}: {source}")]
    Syntax {
        expr: String,
        #[source]
        source: anyhow::Error,
    },

    /// The expression parsed but failed against a document, for example an
    /// unbound namespace prefix.
    #[error("XPath {expr:?} failed to evaluate: {source}")]
    Evaluation {
        expr: String,
        #[source]
        source: anyhow::Error,
    },

    /// The expression evaluated to a string, number, or boolean instead of
    /// a node-set.
    #[error("XPath {expr:?} does not select a node-set")]
    NotANodeset { expr: String },
}

/// Errors from normalizing raw field text into a canonical value.
///
/// Unlike a locator miss, which silently falls back to the field default,
/// these indicate that text was found but could not be understood, and the
/// caller is expected to surface them.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The input does not match the day/month-name/year shape of the locale.
    #[error("date {input:?} does not match any {locale} date format")]
    DateFormat { input: String, locale: Locale },

    /// The input parsed but names a day that does not exist, such as a
    /// February 30th.
    #[error("date {input:?} is not a valid calendar date")]
    DateImpossible { input: String },

    /// No supported locale could make sense of the input.
    #[error("date {input:?} does not match any supported locale")]
    DateUnrecognized { input: String },

    /// The input is not a recognizable decimal amount.
    #[error("amount {input:?} is not a recognizable decimal amount")]
    Amount { input: String },
}
