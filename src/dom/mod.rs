//! Element tree adapter
//!
//! A small retained-mode element tree the renderers write into. It plays the
//! role of the browser DOM: containers are looked up by id, renderers clear
//! and rebuild them, and the finished tree serializes to HTML.
//!
//! - **Element**: tag, id, classes, inline style, attributes, text, children
//! - **Document**: the set of render targets keyed by id
//! - **hover**: per-element hover state and the CSS derived from it

pub mod hover;

pub use hover::{CellVisualState, HoverEffect};

use std::fmt::Write;

/// Child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Pre-rendered markup (inline SVG), emitted verbatim
    Raw(String),
}

/// An HTML element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub style: Vec<(String, String)>,
    pub attributes: Vec<(String, String)>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Shorthand for a `div` with one class
    pub fn div(class: &str) -> Self {
        Self::new("div").class(class)
    }

    /// Builder method: set the id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method: add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builder method: set an inline style property (replaces an existing one)
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    /// Builder method: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder method: set the tooltip
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method: set the text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder method: append a child element
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_raw(&mut self, markup: impl Into<String>) {
        self.children.push(Node::Raw(markup.into()));
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.style.push((property, value)),
        }
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Remove all children and text, keeping identity and styling
    pub fn clear(&mut self) {
        self.children.clear();
        self.text = None;
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Raw(_) => None,
        })
    }

    /// All descendant elements carrying `class`, depth first
    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.has_class(class) {
                found.push(child);
            }
            child.collect_by_class(class, found);
        }
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);

        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let style: Vec<String> = self
                .style
                .iter()
                .map(|(p, v)| format!("{}: {}", p, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape(&style.join("; ")));
        }
        if let Some(title) = &self.title {
            let _ = write!(out, " title=\"{}\"", escape(title));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');

        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_html(out),
                Node::Raw(markup) => out.push_str(markup),
            }
        }

        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Render targets keyed by id
#[derive(Debug, Clone, Default)]
pub struct Document {
    containers: Vec<Element>,
}

impl Document {
    /// Document with one empty `div` container per id
    pub fn with_containers(ids: &[&str]) -> Self {
        Self {
            containers: ids.iter().map(|id| Element::new("div").id(*id)).collect(),
        }
    }

    pub fn insert(&mut self, container: Element) {
        self.containers.push(container);
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.containers
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.containers
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
    }

    pub fn containers(&self) -> &[Element] {
        &self.containers
    }
}

/// Escape text for HTML and XML content and attribute values
pub fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
