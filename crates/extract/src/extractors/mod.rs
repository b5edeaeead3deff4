// ABOUTME: Field extraction strategies for order history pages.
// ABOUTME: Covers field tables, capture patterns, and locator-chain selection.

//! Field extraction module.
//!
//! This module turns a field table and a context node into field values:
//! locator chains select candidate nodes, capture patterns cut the value
//! out of their text, and defaults cover the misses.
//!
//! Submodules:
//! - `spec`: field table data model and validation.
//! - `capture`: single-group regex capture patterns.
//! - `select`: locator-chain walking over an `XpathDom`.
//! - `loader`: the builtin order field table.

pub mod capture;
pub mod loader;
pub mod select;
pub mod spec;
