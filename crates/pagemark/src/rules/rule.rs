//! Rule and Filter types for element conversion.

use crate::convert::Context;
use crate::node::NodeRef;
use crate::tag::Tag;

/// Type alias for replacement functions
///
/// ```rust
/// use pagemark::{Filter, ReplacementFn, Rule, Tag};
///
/// let replacement: ReplacementFn = Box::new(|_, content, _| format!("=={}==", content.trim()));
/// let rule = Rule { filter: Filter::tag(Tag::Span), replacement };
/// assert!(matches!(rule.filter, Filter::Tag(Tag::Span)));
/// ```
pub type ReplacementFn = Box<dyn Fn(&NodeRef, &str, &Context) -> String + Send + Sync>;

/// A filter determines which elements a rule applies to
pub enum Filter {
    /// Match a single tag kind
    Tag(Tag),
    /// Match any of multiple tag kinds
    Tags(Vec<Tag>),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(&NodeRef) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(tag: Tag) -> Self {
        Filter::Tag(tag)
    }

    /// Create a filter for multiple tags
    pub fn tags(tags: &[Tag]) -> Self {
        Filter::Tags(tags.to_vec())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&NodeRef) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches an element
    pub fn matches(&self, node: &NodeRef) -> bool {
        match self {
            Filter::Tag(t) => node.tag() == *t,
            Filter::Tags(tags) => tags.contains(&node.tag()),
            Filter::Predicate(f) => f(node),
        }
    }
}

/// A rule defines how to turn a matched element into a Markdown fragment
pub struct Rule {
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    /// Replacement function: (element, rendered children, context) -> fragment
    pub replacement: ReplacementFn,
}

impl Rule {
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(&NodeRef, &str, &Context) -> String + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: Tag, replacement: F) -> Self
    where
        F: Fn(&NodeRef, &str, &Context) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[Tag], replacement: F) -> Self
    where
        F: Fn(&NodeRef, &str, &Context) -> String + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, node: &NodeRef, content: &str, ctx: &Context) -> String {
        (self.replacement)(node, content, ctx)
    }
}
