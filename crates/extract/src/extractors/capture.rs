// ABOUTME: Regex capture patterns applied to locator text during extraction.
// ABOUTME: Enforces the exactly-one-capture-group contract at compile time.

//! Capture patterns.
//!
//! A field that wants a fragment of a node's text rather than the whole
//! thing carries a regular expression with exactly one capture group. The
//! first non-empty value of that group is the extracted value.

use regex::Regex;
use thiserror::Error;

/// Why a pattern string was rejected.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// The pattern compiled but has the wrong number of capture groups.
    #[error("expected exactly one capture group, found {0}")]
    Groups(usize),
}

/// A compiled capture pattern with exactly one capture group.
#[derive(Debug, Clone)]
pub struct CapturePattern {
    pattern: String,
    regex: Regex,
}

impl CapturePattern {
    /// Compiles `pattern` and checks the capture-group contract.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern)?;
        // captures_len counts the implicit whole-match group 0.
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(PatternError::Groups(groups));
        }
        Ok(CapturePattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Scans `text` and returns the first non-empty value of the capture
    /// group.
    ///
    /// Matches where the group captured nothing, or an empty string, are
    /// skipped so that a later occurrence in the same text can still win.
    /// A `*`-quantified group matching zero characters therefore never
    /// produces a value.
    pub fn capture(&self, text: &str) -> Option<String> {
        for caps in self.regex.captures_iter(text) {
            if let Some(group) = caps.get(1) {
                if !group.as_str().is_empty() {
                    return Some(group.as_str().to_string());
                }
            }
        }
        None
    }
}
