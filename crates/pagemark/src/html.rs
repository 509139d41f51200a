//! HTML parsing support.
//!
//! Converts scraper (html5ever) output into the owned Node structure the
//! extractor walks. Comments, doctypes and processing instructions are
//! dropped.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a Node tree rooted at a synthetic `<html>`.
///
/// # Example
///
/// ```rust
/// use pagemark::{parse_html, Extractor};
///
/// let node = parse_html("<h1>Hello <em>big world</em></h1>");
/// let markdown = Extractor::new().convert(&node, None);
/// assert_eq!(markdown, "# Hello *big world*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let fragment = Html::parse_fragment(html);
    scraper_to_node(fragment.root_element())
}

/// Parse a complete HTML document into a Node tree rooted at `<html>`.
pub fn parse_document(html: &str) -> Node {
    let document = Html::parse_document(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
