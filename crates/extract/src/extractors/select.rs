// ABOUTME: Locator-chain field extraction over any XpathDom backend.
// ABOUTME: Implements ordering, capture, fault isolation, and default fallback.

//! Locator-chain field extraction.
//!
//! This module is the heart of the engine: given a context node and a
//! compiled field, walk the field's locator chain and produce a value.
//!
//! Key behaviors:
//! - Locators are tried strictly in declaration order; the first one that
//!   produces a value wins, even when a later one would also match.
//! - Node text is whitespace-normalized before any matching.
//! - With a capture pattern, a node only counts when the group captures
//!   something non-empty; without one, any non-empty text counts.
//! - A locator that fails to compile or evaluate is logged at warn level
//!   and skipped. One broken locator never takes down its chain, and the
//!   same inputs always produce the same value.
//! - When the whole chain comes up empty the field default is returned.

use tracing::{debug, warn};

use crate::dom::XpathDom;
use crate::extractors::spec::CompiledField;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The non-empty normalized texts selected by one locator, in document
/// order. Evaluation failures are reported as an empty list after logging.
fn locator_texts<D: XpathDom>(dom: &D, context: D::Node, expr: &str) -> Vec<String> {
    let nodes = match dom.evaluate(expr, context) {
        Ok(nodes) => nodes,
        Err(err) => {
            warn!("skipping locator {:?}: {}", expr, err);
            return Vec::new();
        }
    };
    nodes
        .into_iter()
        .map(|node| normalize_whitespace(&dom.string_value(node)))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Extracts a single field value relative to `context`.
///
/// Walks `field`'s locators in order. For each locator, candidate nodes
/// are visited in document order; the first node whose text yields a value
/// ends the walk. With a capture pattern the value is the pattern's first
/// non-empty group match, otherwise it is the node text itself.
///
/// Never fails: any chain that produces nothing, including the empty
/// chain, degrades to the field default. Multi-valued fields should go
/// through [`extract_all`] instead; this function stops at one value.
pub fn extract_field<D: XpathDom>(dom: &D, context: D::Node, field: &CompiledField) -> String {
    for expr in field.locators() {
        for text in locator_texts(dom, context, expr) {
            match field.capture() {
                Some(capture) => {
                    if let Some(value) = capture.capture(&text) {
                        return value;
                    }
                }
                None => return text,
            }
        }
    }
    debug!("field {:?} produced nothing, using default", field.name());
    field.default_value().to_string()
}

/// Locator chain without a field table: the first non-empty text wins,
/// otherwise `default`.
///
/// This is the ad-hoc form for callers holding a few locator strings and
/// no [`CompiledField`]. The locators have not been validated, so a bad
/// expression is simply logged and skipped like any other failure.
pub fn extract_first_text<D, S>(dom: &D, context: D::Node, locators: &[S], default: &str) -> String
where
    D: XpathDom,
    S: AsRef<str>,
{
    for expr in locators {
        if let Some(text) = locator_texts(dom, context, expr.as_ref()).into_iter().next() {
            return text;
        }
    }
    default.to_string()
}

/// Extracts every value produced by the first productive locator.
///
/// Locators are still tried in order, but the winning locator contributes
/// all of its nodes, not just the first. A locator whose nodes all fail
/// the capture pattern is not productive and the walk moves on. Returns an
/// empty vec when nothing matches; a list field has no single default.
pub fn extract_all<D: XpathDom>(dom: &D, context: D::Node, field: &CompiledField) -> Vec<String> {
    for expr in field.locators() {
        let texts = locator_texts(dom, context, expr);
        let values: Vec<String> = match field.capture() {
            Some(capture) => texts.iter().filter_map(|text| capture.capture(text)).collect(),
            None => texts,
        };
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}
