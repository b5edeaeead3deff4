// ABOUTME: Field table data model: named locator chains, capture patterns, defaults.
// ABOUTME: Validates whole tables up front so extraction never sees a broken config.

//! Field table definitions.
//!
//! A field table maps field names to [`FieldSpec`]s: an ordered XPath
//! locator chain, an optional capture pattern, and a default value. Tables
//! are plain JSON arrays rather than objects so declaration order survives
//! the trip, and must pass [`FieldTable::validate`] before use. A table
//! that fails validation is a configuration error and no page gets
//! processed with it; extraction itself only ever reports per-page
//! conditions.

use serde::{Deserialize, Serialize};

use crate::dom::xml::validate_xpath;
use crate::error::SpecError;
use crate::extractors::capture::{CapturePattern, PatternError};
use crate::normalize::date::Locale;

/// How a field's raw value is meant to be normalized downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain text, no normalization.
    #[default]
    Text,
    /// A human-readable date, normalized to ISO-8601.
    Date,
    /// A currency amount, normalized to a plain decimal.
    Amount,
}

/// Declarative recipe for extracting one field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Name callers use to look the field up.
    pub name: String,
    /// XPath locators, tried strictly in order. An empty list is legal and
    /// means the field always takes its default.
    #[serde(default)]
    pub locators: Vec<String>,
    /// Capture pattern with exactly one group. Absent means the whole
    /// node text is the value.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Value reported when no locator produces anything.
    #[serde(default)]
    pub default: String,
    /// Collect every node of the first productive locator instead of the
    /// first value only.
    #[serde(default)]
    pub multi: bool,
    #[serde(default)]
    pub kind: FieldKind,
    /// Locale hint for date fields, e.g. "fr". Absent means try them all.
    #[serde(default)]
    pub locale: Option<String>,
}

/// An ordered collection of field specs, as parsed from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTable {
    fields: Vec<FieldSpec>,
}

impl FieldTable {
    /// Parses a table from a JSON array of field specs.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up a spec by name. The first declaration wins on duplicates.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Checks every locator, pattern, and locale and compiles the patterns.
    ///
    /// Validation stops at the first broken field; the error names that
    /// field so the table author knows where to look.
    pub fn validate(self) -> Result<CompiledTable, SpecError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for spec in self.fields {
            fields.push(CompiledField::compile(spec)?);
        }
        Ok(CompiledTable { fields })
    }
}

/// A validated field spec with its capture pattern compiled and its locale
/// hint parsed.
#[derive(Debug, Clone)]
pub struct CompiledField {
    spec: FieldSpec,
    capture: Option<CapturePattern>,
    locale: Option<Locale>,
}

impl CompiledField {
    fn compile(spec: FieldSpec) -> Result<Self, SpecError> {
        for expr in &spec.locators {
            validate_xpath(expr).map_err(|source| SpecError::Locator {
                field: spec.name.clone(),
                expr: expr.clone(),
                source,
            })?;
        }

        let capture = match &spec.pattern {
            Some(pattern) => {
                let compiled = CapturePattern::new(pattern).map_err(|err| match err {
                    PatternError::Regex(source) => SpecError::Pattern {
                        field: spec.name.clone(),
                        pattern: pattern.clone(),
                        source,
                    },
                    PatternError::Groups(found) => SpecError::CaptureGroups {
                        field: spec.name.clone(),
                        pattern: pattern.clone(),
                        found,
                    },
                })?;
                Some(compiled)
            }
            None => None,
        };

        let locale = match &spec.locale {
            Some(code) => Some(code.parse::<Locale>().map_err(|_| SpecError::Locale {
                field: spec.name.clone(),
                locale: code.clone(),
            })?),
            None => None,
        };

        Ok(CompiledField {
            spec,
            capture,
            locale,
        })
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn locators(&self) -> &[String] {
        &self.spec.locators
    }

    pub fn capture(&self) -> Option<&CapturePattern> {
        self.capture.as_ref()
    }

    pub fn default_value(&self) -> &str {
        &self.spec.default
    }

    pub fn multi(&self) -> bool {
        self.spec.multi
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    /// The underlying declarative spec.
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }
}

/// A fully validated table, ready for extraction.
#[derive(Debug, Clone)]
pub struct CompiledTable {
    fields: Vec<CompiledField>,
}

impl CompiledTable {
    /// Looks up a compiled field by name.
    pub fn get(&self, name: &str) -> Option<&CompiledField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
