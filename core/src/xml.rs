//! Fluent XML query and mutation helper over a DOM tree and XPath.
//!
//! # Design
//! `XmlDocument` owns the parsed tree plus a namespace-prefix map;
//! `XmlNode<'d>` is a borrowed view over one document-or-element node and
//! carries every accessor. Views derived through `helper`/`helpers`/`add`
//! receive a copy of the namespace map, so registrations flow down to
//! descendants but never back up to the parent. Each query builds a fresh
//! XPath context from the view's current map.
//!
//! "Not found" is never an error: absent elements and attributes come back
//! as `None`, empty query results as empty `Vec`s. Only malformed input
//! (`XmlError::Parse`) and broken expressions (`XmlError::XPath`) fail.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use sxd_document::dom::{ChildOfElement, ChildOfRoot, Document, Element};
use sxd_document::{parser, Package};
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value};

use crate::error::XmlError;
use crate::render;
use crate::value;

type NamespaceMap = BTreeMap<String, String>;

/// Owner of a DOM tree and the namespace registrations seeded into views.
///
/// Views returned by [`root`](Self::root) (and everything derived from
/// them) borrow the document; it must outlive them all.
pub struct XmlDocument {
    package: Package,
    namespaces: NamespaceMap,
}

impl std::fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlDocument")
            .field("namespaces", &self.namespaces)
            .finish_non_exhaustive()
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlDocument {
    /// A fresh, empty document.
    pub fn new() -> Self {
        Self {
            package: Package::new(),
            namespaces: NamespaceMap::new(),
        }
    }

    /// Parse `text` as XML.
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let package = parser::parse(text).map_err(|err| XmlError::Parse(format!("{err:?}")))?;
        Ok(Self {
            package,
            namespaces: NamespaceMap::new(),
        })
    }

    /// Register `prefix` for `uri` in XPath expressions, overwriting an
    /// existing registration of the same prefix.
    pub fn with_namespace(mut self, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Register several `(prefix, uri)` pairs at once.
    pub fn with_namespaces<P, U, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        for (prefix, uri) in pairs {
            self.namespaces.insert(prefix.into(), uri.into());
        }
        self
    }

    /// The document-level view. Namespace registrations made on the
    /// document so far are copied into it.
    pub fn root(&self) -> XmlNode<'_> {
        XmlNode {
            target: XmlTarget::Document(self.package.as_document()),
            namespaces: self.namespaces.clone(),
        }
    }

    /// Render the whole document as indented XML text.
    pub fn to_xml(&self) -> String {
        self.root().to_xml()
    }
}

/// The node a view points at. Both variants reach the owning document.
#[derive(Copy, Clone)]
enum XmlTarget<'d> {
    Document(Document<'d>),
    Element(Element<'d>),
}

/// A borrowed view over one node of an [`XmlDocument`].
///
/// All accessors are relative to the view's own node; to query relative to
/// some other node, project a view onto it first (`helper`/`helpers`).
#[derive(Clone)]
pub struct XmlNode<'d> {
    target: XmlTarget<'d>,
    namespaces: NamespaceMap,
}

impl<'d> XmlNode<'d> {
    /// Register `prefix` for `uri` on this view and everything derived
    /// from it afterwards. The parent view is not affected.
    pub fn with_namespace(mut self, uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Register several `(prefix, uri)` pairs at once.
    pub fn with_namespaces<P, U, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        for (prefix, uri) in pairs {
            self.namespaces.insert(prefix.into(), uri.into());
        }
        self
    }

    // -----------------------------------------------------------------------
    // Query primitives
    // -----------------------------------------------------------------------

    /// First node matched by `expression`, in document order.
    pub fn find_first(&self, expression: &str) -> Result<Option<Node<'d>>, XmlError> {
        Ok(self.find_all(expression)?.into_iter().next())
    }

    /// All nodes matched by `expression`, in document order.
    pub fn find_all(&self, expression: &str) -> Result<Vec<Node<'d>>, XmlError> {
        self.query(expression)
            .map_err(|err| XmlError::XPath(err.to_string()))
    }

    fn query(&self, expression: &str) -> Result<Vec<Node<'d>>, sxd_xpath::Error> {
        let xpath = Factory::new()
            .build(expression)?
            .ok_or(sxd_xpath::Error::NoXPath)?;

        let mut context = Context::new();
        for (prefix, uri) in &self.namespaces {
            context.set_namespace(prefix, uri);
        }

        // A valid expression yielding a non-nodeset value is an empty result.
        match xpath.evaluate(&context, self.context_node())? {
            Value::Nodeset(nodes) => Ok(nodes.document_order()),
            _ => Ok(Vec::new()),
        }
    }

    // -----------------------------------------------------------------------
    // Node retrieval
    // -----------------------------------------------------------------------

    /// First child element selected by `./name`.
    pub fn element(&self, name: &str) -> Result<Option<Element<'d>>, XmlError> {
        Ok(self.elements(name)?.into_iter().next())
    }

    /// All child elements selected by `./name`, in document order.
    pub fn elements(&self, name: &str) -> Result<Vec<Element<'d>>, XmlError> {
        let nodes = self.find_all(&format!("./{name}"))?;
        Ok(nodes
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .collect())
    }

    /// The attribute's value, or `None` when it is absent.
    ///
    /// `Some("")` means "present but empty" — distinct from absent.
    /// Document-level views carry no attributes.
    pub fn attribute(&self, name: &str) -> Option<&'d str> {
        match self.target {
            XmlTarget::Element(element) => element.attribute_value(name),
            XmlTarget::Document(_) => None,
        }
    }

    // -----------------------------------------------------------------------
    // Typed element accessors, singular
    // -----------------------------------------------------------------------

    /// Text content of the named child element.
    pub fn string(&self, name: &str) -> Result<Option<String>, XmlError> {
        Ok(self.element(name)?.map(|element| element_text(&element)))
    }

    /// Text content parsed as an integer; non-numeric text is `0`.
    pub fn integer(&self, name: &str) -> Result<Option<i64>, XmlError> {
        Ok(self
            .element(name)?
            .map(|element| value::parse_integer(&element_text(&element))))
    }

    /// Text content parsed as a float; non-numeric text is `0.0`.
    pub fn float(&self, name: &str) -> Result<Option<f64>, XmlError> {
        Ok(self
            .element(name)?
            .map(|element| value::parse_float(&element_text(&element))))
    }

    /// Text content parsed against a chrono `format` string.
    ///
    /// `Ok(None)` covers both an absent element and unparseable text.
    pub fn date_time(&self, name: &str, format: &str) -> Result<Option<NaiveDateTime>, XmlError> {
        Ok(self
            .element(name)?
            .and_then(|element| value::parse_date_time(&element_text(&element), format)))
    }

    // -----------------------------------------------------------------------
    // Typed element accessors, plural
    // -----------------------------------------------------------------------

    /// Text contents of all elements selected by `./expression`.
    pub fn strings(&self, expression: &str) -> Result<Vec<String>, XmlError> {
        Ok(self
            .elements(expression)?
            .iter()
            .map(element_text)
            .collect())
    }

    /// Element-wise permissive integer parse; unparseable entries are `0`.
    pub fn integers(&self, expression: &str) -> Result<Vec<i64>, XmlError> {
        Ok(self
            .elements(expression)?
            .iter()
            .map(|element| value::parse_integer(&element_text(element)))
            .collect())
    }

    /// Element-wise permissive float parse; unparseable entries are `0.0`.
    pub fn floats(&self, expression: &str) -> Result<Vec<f64>, XmlError> {
        Ok(self
            .elements(expression)?
            .iter()
            .map(|element| value::parse_float(&element_text(element)))
            .collect())
    }

    /// Element-wise datetime parse. Unparseable entries stay in the result
    /// as `None` — positions always line up with the matched elements.
    pub fn date_times(
        &self,
        expression: &str,
        format: &str,
    ) -> Result<Vec<Option<NaiveDateTime>>, XmlError> {
        Ok(self
            .elements(expression)?
            .iter()
            .map(|element| value::parse_date_time(&element_text(element), format))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Typed attribute accessors
    // -----------------------------------------------------------------------

    pub fn string_attribute(&self, name: &str) -> Option<String> {
        self.attribute(name).map(str::to_string)
    }

    pub fn integer_attribute(&self, name: &str) -> Option<i64> {
        self.attribute(name).map(value::parse_integer)
    }

    pub fn float_attribute(&self, name: &str) -> Option<f64> {
        self.attribute(name).map(value::parse_float)
    }

    // -----------------------------------------------------------------------
    // View projection
    // -----------------------------------------------------------------------

    /// Like [`element`](Self::element), wrapped as a view for chaining.
    pub fn helper(&self, name: &str) -> Result<Option<XmlNode<'d>>, XmlError> {
        Ok(self.element(name)?.map(|element| self.derive(element)))
    }

    /// Like [`elements`](Self::elements), each wrapped as a view.
    pub fn helpers(&self, expression: &str) -> Result<Vec<XmlNode<'d>>, XmlError> {
        Ok(self
            .elements(expression)?
            .into_iter()
            .map(|element| self.derive(element))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Create an element named `name`, give it `value` as text content when
    /// non-empty, append it as the last child of this view's node, and
    /// return its view. Document-level views append under the root.
    pub fn add(&self, name: &str, value: &str) -> XmlNode<'d> {
        let document = self.document();
        let element = document.create_element(name);
        if !value.is_empty() {
            element.append_child(document.create_text(value));
        }
        match self.target {
            XmlTarget::Document(doc) => {
                doc.root().append_child(element);
            }
            XmlTarget::Element(parent) => {
                parent.append_child(element);
            }
        }
        self.derive(element)
    }

    /// Set (overwriting) the named attribute on this view's element.
    ///
    /// A document-level view targets its root element; on an empty
    /// document this is a no-op.
    pub fn set_attribute(&self, name: &str, value: &str) {
        match self.target {
            XmlTarget::Element(element) => {
                element.set_attribute_value(name, value);
            }
            XmlTarget::Document(doc) => {
                if let Some(root) = document_root_element(&doc) {
                    root.set_attribute_value(name, value);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Render this view's node and subtree as indented XML text.
    ///
    /// Document-level views carry the XML declaration, element views only
    /// the subtree.
    pub fn to_xml(&self) -> String {
        match self.target {
            XmlTarget::Document(doc) => render::document_to_string(&doc),
            XmlTarget::Element(element) => render::element_to_string(&element),
        }
    }

    // -----------------------------------------------------------------------

    fn derive(&self, element: Element<'d>) -> XmlNode<'d> {
        XmlNode {
            target: XmlTarget::Element(element),
            namespaces: self.namespaces.clone(),
        }
    }

    fn document(&self) -> Document<'d> {
        match self.target {
            XmlTarget::Document(doc) => doc,
            XmlTarget::Element(element) => element.document(),
        }
    }

    fn context_node(&self) -> Node<'d> {
        match self.target {
            XmlTarget::Document(doc) => doc.root().into(),
            XmlTarget::Element(element) => element.into(),
        }
    }
}

/// Concatenated text content of an element and its descendants.
fn element_text(element: &Element<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: &Element<'_>, out: &mut String) {
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => out.push_str(text.text()),
            ChildOfElement::Element(inner) => collect_text(&inner, out),
            _ => {}
        }
    }
}

fn document_root_element<'d>(document: &Document<'d>) -> Option<Element<'d>> {
    document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            ChildOfRoot::Element(element) => Some(element),
            _ => None,
        })
}
