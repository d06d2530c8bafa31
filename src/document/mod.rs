//! Owned, mutable XML tree for SVG map documents.
//!
//! Parsing goes through `roxmltree`; the tree keeps element order, qualified
//! names, namespace declarations, attribute order, text, comments and
//! processing instructions so an unmodified document writes back
//! structurally identical. DTDs are accepted but not written back.

pub mod station;
pub mod style;

use std::fs;

use crate::error::{DocumentError, Result};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, value: Option<String> },
}

/// An element with its qualified name, attributes in source order and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Qualified name, including the namespace prefix if any (`svg:g`).
    pub name: String,
    /// Attributes as `(qualified name, value)` pairs, including `xmlns` declarations.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the name without its namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Returns the value of the attribute with the given qualified name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Sets an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name.to_owned(), value)),
        }
    }

    /// Returns `true` if this is a `<g>` element whose id starts with `prefix`.
    #[must_use]
    pub fn is_group_with_id_prefix(&self, prefix: &str) -> bool {
        self.local_name() == "g" && self.id().is_some_and(|id| id.starts_with(prefix))
    }

    /// Iterates over the direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Finds the first element in document order (this element included)
    /// matching `pred`.
    #[must_use]
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    /// Mutable counterpart of [`Element::find`].
    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if let Some(found) = el.find_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visits this element and all descendant elements in document order.
    ///
    /// Children are visited after `f` has run on their parent, so `f` may
    /// replace them.
    pub fn visit_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        f(self);
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.visit_mut(f);
            }
        }
    }
}

/// A parsed document: the top-level nodes, one of which is the root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parses a document from XML text.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Xml` if the text is not well-formed.
    pub fn parse(text: &str) -> Result<Self> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)
            .map_err(DocumentError::from)?;
        let nodes = doc.root().children().filter_map(convert_node).collect();
        Ok(Self { nodes })
    }

    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Io` if the file cannot be read, or
    /// `DocumentError::Xml` if it is not well-formed.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Serializes and writes the document to disk.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Io` if the file cannot be written.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        fs::write(path, self.to_xml_string()).map_err(|source| {
            DocumentError::Io {
                path: path.to_owned(),
                source,
            }
            .into()
        })
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Returns the root element mutably.
    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Serializes the document with an XML declaration.
    #[must_use]
    pub fn to_xml_string(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        for node in &self.nodes {
            write_node(&mut out, node);
            out.push('\n');
        }
        out
    }
}

fn convert_node(node: roxmltree::Node) -> Option<Node> {
    if node.is_element() {
        Some(Node::Element(convert_element(node)))
    } else if node.is_text() {
        node.text().map(|t| Node::Text(t.to_owned()))
    } else if node.is_comment() {
        node.text().map(|t| Node::Comment(t.to_owned()))
    } else if let Some(pi) = node.pi() {
        Some(Node::ProcessingInstruction {
            target: pi.target.to_owned(),
            value: pi.value.map(str::to_owned),
        })
    } else {
        None
    }
}

fn convert_element(node: roxmltree::Node) -> Element {
    let mut attributes = Vec::new();

    // Only declarations new at this element are written out.
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_owned(),
        };
        attributes.push((key, ns.uri().to_owned()));
    }

    for attr in node.attributes() {
        attributes.push((
            qualified_name(&node, attr.namespace(), attr.name()),
            attr.value().to_owned(),
        ));
    }

    let tag = node.tag_name();
    Element {
        name: qualified_name(&node, tag.namespace(), tag.name()),
        attributes,
        children: node.children().filter_map(convert_node).collect(),
    }
}

fn qualified_name(node: &roxmltree::Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_owned(),
    }
}

fn escape(value: &str, quote: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape(value, true));
    out.push('"');
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(text) => out.push_str(&escape(text, false)),
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::ProcessingInstruction { target, value } => {
            out.push_str("<?");
            out.push_str(target);
            if let Some(value) = value {
                out.push(' ');
                out.push_str(value);
            }
            out.push_str("?>");
        }
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.name);
    for (key, value) in &el.attributes {
        push_attr(out, key, value);
    }
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.name);
    out.push('>');
}
