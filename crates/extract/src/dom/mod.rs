// ABOUTME: Document access layer for XPath-driven field extraction.
// ABOUTME: Defines the XpathDom trait and the sxd-document backed implementation.

//! Document access module.
//!
//! Extraction never touches a DOM implementation directly. Everything goes
//! through [`XpathDom`], which reduces a document to the three things the
//! field extractor needs: a root node, XPath evaluation to an ordered list
//! of nodes, and the string-value of a node.
//!
//! Submodules:
//! - `xml`: [`xml::XmlDom`], the default backend over `sxd-document`.

pub mod xml;

use crate::error::XpathError;

/// Minimal XPath view of a parsed document.
///
/// Implementations must return nodes in document order from [`evaluate`]
/// and must not mutate the document. Node handles are plain copyable
/// values so callers can hold several while walking fallback chains.
///
/// [`evaluate`]: XpathDom::evaluate
pub trait XpathDom {
    /// Handle to a node in the document. Attribute and text nodes count.
    type Node: Copy;

    /// The document root, used as the context for absolute locators.
    fn root(&self) -> Self::Node;

    /// Evaluates `expr` with `context` as the context node and returns the
    /// matching nodes in document order.
    ///
    /// A valid expression that matches nothing is `Ok` with an empty vec.
    /// An expression that cannot be compiled or evaluated is an error; the
    /// caller decides whether that is fatal.
    fn evaluate(&self, expr: &str, context: Self::Node) -> Result<Vec<Self::Node>, XpathError>;

    /// The XPath string-value of a node: concatenated descendant text for
    /// elements, the value itself for attribute and text nodes.
    fn string_value(&self, node: Self::Node) -> String;
}
