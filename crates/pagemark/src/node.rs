//! CDP-style DOM Node structure for content extraction.
//!
//! The extractor never mutates the tree it is given. Hosts that already
//! hold a live DOM (CDP, a browser extension bridge, html5ever) convert it
//! into this owned structure once and hand it over by reference. Hosts that
//! can answer layout queries attach a [`ComputedStyle`] snapshot per element.

use crate::style::ComputedStyle;
use crate::tag::Tag;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            3 => NodeType::Text,
            8 => NodeType::Comment,
            9 => NodeType::Document,
            11 => NodeType::DocumentFragment,
            _ => NodeType::Element,
        }
    }
}

/// A DOM node following the CDP DOM.Node structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Text content for text nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,

    /// Style resolved by the host's layout engine, if it has one
    pub computed_style: Option<ComputedStyle>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
            computed_style: None,
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect();

        Self {
            attributes: Some(flat_attrs),
            ..Self::element(tag_name)
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
            computed_style: None,
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            node_type: NodeType::Document,
            node_name: "#document".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
            computed_style: None,
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            ..Self::document()
        }
    }

    /// Attach a computed style snapshot (builder style)
    #[must_use]
    pub fn with_computed_style(mut self, style: ComputedStyle) -> Self {
        self.computed_style = Some(style);
        self
    }

    /// Add a child and return self (builder style)
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get the tag kind used for rule dispatch.
    ///
    /// Non-element nodes report [`Tag::Other`].
    pub fn tag(&self) -> Tag {
        if self.is_element() {
            Tag::from_name(&self.node_name)
        } else {
            Tag::Other
        }
    }

    /// Get an attribute value by name (case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The element id, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Iterate the whitespace-separated class names
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Exact class-name membership test
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let attrs = self.attributes.get_or_insert_with(Vec::new);

        if let Some(pair) = attrs
            .chunks_exact_mut(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
        {
            pair[1] = value.to_string();
            return;
        }
        attrs.push(name.to_string());
        attrs.push(value.to_string());
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self.node_type {
            NodeType::Text => self.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self.children().map(Node::text_content).collect(),
        }
    }

    /// The style the filter should consult.
    ///
    /// A host-supplied snapshot wins. Otherwise the inline `style`
    /// attribute and the `hidden` attribute stand in for layout.
    pub fn computed_style(&self) -> ComputedStyle {
        if let Some(style) = &self.computed_style {
            return style.clone();
        }

        let mut style = self
            .attr("style")
            .map(ComputedStyle::from_inline)
            .unwrap_or_default();
        if self.has_attr("hidden") {
            style.display = Some("none".to_string());
        }
        style
    }
}

/// A reference to a node with the context the rules need.
///
/// This allows looking at the parent and previous sibling without storing
/// back-pointers in the tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    parent: Option<&'a Node>,
    prev_sibling: Option<&'a Node>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent: None,
            prev_sibling: None,
        }
    }

    /// Create a NodeRef for a child of `parent`
    pub fn child(node: &'a Node, parent: &'a Node, prev_sibling: Option<&'a Node>) -> Self {
        Self {
            node,
            parent: Some(parent),
            prev_sibling,
        }
    }

    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    pub fn parent_tag(&self) -> Option<Tag> {
        self.parent.map(Node::tag)
    }

    pub fn prev_sibling(&self) -> Option<&'a Node> {
        self.prev_sibling
    }

    /// Whether the previous sibling's text ends in a word character
    pub fn prev_ends_with_word_char(&self) -> bool {
        self.prev_sibling
            .map(Node::text_content)
            .and_then(|text| text.chars().last())
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
    }

    pub fn tag(&self) -> Tag {
        self.node.tag()
    }

    pub fn tag_name(&self) -> String {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }
}
