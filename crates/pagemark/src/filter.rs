//! Content-relevance filter: decides which elements are page chrome.
//!
//! The filter is a pure predicate over a node and its computed style. It
//! holds the vocabularies lowercased once so per-node checks stay cheap.

use crate::node::{Node, NodeType};
use crate::options::ExtractOptions;
use crate::utilities::collapse_whitespace;

/// Attributes that mark an element as a control trigger
const CONTROL_ATTRIBUTES: &[&str] = &["data-hotkey", "data-menu-button", "data-action", "data-target"];

/// ARIA label fragments of sorting/filtering widgets
const CONTROL_LABEL_TERMS: &[&str] = &["filter", "sort", "menu"];

/// ARIA roles of non-content widgets
const CHROME_ROLES: &[&str] = &["button", "menu", "menuitem", "navigation"];

#[derive(Debug, Clone)]
pub struct ContentFilter {
    terms: Vec<String>,
}

impl ContentFilter {
    /// Build a filter from the generic and site-specific vocabularies
    pub fn new(options: &ExtractOptions) -> Self {
        let terms = options
            .noise_terms
            .iter()
            .chain(&options.site.chrome_terms)
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Whether an element is non-content chrome that must not be visited.
    ///
    /// Non-element nodes are never skipped.
    pub fn should_skip(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }

        node.tag().is_ignored()
            || self.has_noise_name(node)
            || is_control_trigger(node)
            || has_chrome_role(node)
            || node.computed_style().is_hidden()
    }

    fn has_noise_name(&self, node: &Node) -> bool {
        node.classes()
            .chain(node.id())
            .map(str::to_lowercase)
            .any(|name| self.terms.iter().any(|term| name.contains(term.as_str())))
    }

    /// Visible text of a subtree: text of every descendant not under a
    /// skipped element, whitespace collapsed and trimmed.
    pub fn visible_text(&self, node: &Node) -> String {
        let mut raw = String::new();
        self.collect_visible_text(node, &mut raw);
        collapse_whitespace(&raw).trim().to_string()
    }

    fn collect_visible_text(&self, node: &Node, out: &mut String) {
        match node.node_type {
            NodeType::Text => {
                if let Some(text) = &node.node_value {
                    out.push_str(text);
                    out.push(' ');
                }
            }
            NodeType::Comment => {}
            _ => {
                if self.should_skip(node) {
                    return;
                }
                for child in node.children() {
                    self.collect_visible_text(child, out);
                }
            }
        }
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(&ExtractOptions::default())
    }
}

fn is_control_trigger(node: &Node) -> bool {
    CONTROL_ATTRIBUTES.iter().any(|attr| node.has_attr(attr))
        || node.attr("aria-label").is_some_and(|label| {
            let label = label.to_lowercase();
            CONTROL_LABEL_TERMS.iter().any(|term| label.contains(term))
        })
}

fn has_chrome_role(node: &Node) -> bool {
    node.attr("role")
        .is_some_and(|role| CHROME_ROLES.contains(&role.trim().to_lowercase().as_str()))
        || node
            .attr("aria-hidden")
            .is_some_and(|hidden| hidden.trim().eq_ignore_ascii_case("true"))
}
