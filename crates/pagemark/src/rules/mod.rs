//! Rule table for element conversion.

mod markdown;
mod rule;

pub use markdown::{is_math_span, markdown_rules};
pub use rule::{Filter, ReplacementFn, Rule};

use indexmap::IndexMap;

use crate::node::NodeRef;

/// Collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (checked first, in insertion order)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in Markdown rules
    markdown_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in Markdown rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            markdown_rules: markdown_rules(),
        }
    }

    /// Add or replace a custom rule
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Find the rule for a node; `None` means pass children through
    pub fn for_node(&self, node: &NodeRef) -> Option<&Rule> {
        self.custom_rules
            .values()
            .chain(&self.markdown_rules)
            .find(|rule| rule.filter.matches(node))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
