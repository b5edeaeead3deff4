// ABOUTME: Default XpathDom backend over sxd-document and sxd-xpath.
// ABOUTME: Caches compiled XPath expressions per document instance.

//! XML-backed document access.
//!
//! XPath parsing is expensive relative to the actual evaluation, and field
//! tables reuse the same handful of locators across every order card on a
//! page. [`XmlDom`] therefore compiles each expression once and keeps it in
//! a per-instance cache. The cache lives inside the dom, not in a global,
//! so two documents never share state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sxd_document::dom::Document;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

use crate::dom::XpathDom;
use crate::error::XpathError;

/// Checks that `expr` is a parseable XPath expression.
///
/// Locator validation happens before any document exists, so this compiles
/// against nothing and discards the result. An empty expression is rejected
/// even though the parser tolerates it.
pub fn validate_xpath(expr: &str) -> Result<(), XpathError> {
    let factory = Factory::new();
    match factory.build(expr) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(XpathError::Syntax {
            expr: expr.to_string(),
            source: anyhow::anyhow!("empty XPath expression"),
        }),
        Err(err) => Err(XpathError::Syntax {
            expr: expr.to_string(),
            source: anyhow::Error::new(err),
        }),
    }
}

/// [`XpathDom`] over a parsed `sxd_document` document.
///
/// Callers own the parse: build a `Package` with `sxd_document::parser`,
/// then hand `package.as_document()` here. Malformed markup is the
/// caller's problem and is reported by the parser, never by this type.
pub struct XmlDom<'d> {
    document: Document<'d>,
    context: Context<'d>,
    factory: Factory,
    cache: RefCell<HashMap<String, Rc<XPath>>>,
}

impl<'d> XmlDom<'d> {
    pub fn new(document: Document<'d>) -> Self {
        XmlDom {
            document,
            context: Context::new(),
            factory: Factory::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Gets or compiles an XPath expression, caching the result.
    fn compile(&self, expr: &str) -> Result<Rc<XPath>, XpathError> {
        if let Some(cached) = self.cache.borrow().get(expr) {
            return Ok(Rc::clone(cached));
        }

        let built = self.factory.build(expr).map_err(|err| XpathError::Syntax {
            expr: expr.to_string(),
            source: anyhow::Error::new(err),
        })?;
        let xpath = built.ok_or_else(|| XpathError::Syntax {
            expr: expr.to_string(),
            source: anyhow::anyhow!("empty XPath expression"),
        })?;

        let xpath = Rc::new(xpath);
        self.cache
            .borrow_mut()
            .insert(expr.to_string(), Rc::clone(&xpath));
        Ok(xpath)
    }
}

impl<'d> XpathDom for XmlDom<'d> {
    type Node = Node<'d>;

    fn root(&self) -> Node<'d> {
        self.document.root().into()
    }

    fn evaluate(&self, expr: &str, context: Node<'d>) -> Result<Vec<Node<'d>>, XpathError> {
        let xpath = self.compile(expr)?;
        let value = xpath
            .evaluate(&self.context, context)
            .map_err(|err| XpathError::Evaluation {
                expr: expr.to_string(),
                source: anyhow::Error::new(err),
            })?;
        match value {
            Value::Nodeset(nodes) => Ok(nodes.document_order()),
            _ => Err(XpathError::NotANodeset {
                expr: expr.to_string(),
            }),
        }
    }

    fn string_value(&self, node: Node<'d>) -> String {
        node.string_value()
    }
}
