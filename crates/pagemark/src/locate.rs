//! Main-content locator.
//!
//! Picks the subtree most likely to hold the page's primary content. The
//! strategies run in order and the first hit wins; the document body is the
//! universal fallback, so location never fails.

use tracing::{debug, trace};

use crate::document::Document;
use crate::filter::ContentFilter;
use crate::node::Node;
use crate::options::SiteProfile;
use crate::tag::Tag;

/// Semantic landmarks, in priority order
const LANDMARK_SELECTORS: &[&str] = &["article", "main", "[role=main]"];

/// Common CMS/blog content containers, in priority order
const CONTAINER_SELECTORS: &[&str] = &[
    ".content",
    "#content",
    ".post",
    ".entry-content",
    ".post-content",
    ".article-content",
    ".page-content",
    ".container",
    ".wrapper",
    ".main-content",
];

/// A simple selector: `tag`, `.class`, `#id` or `[attr=value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    Attr(String, String),
}

impl Selector {
    /// Parse a simple selector. Returns `None` for anything more complex.
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if let Some(class) = selector.strip_prefix('.') {
            return is_ident(class).then(|| Selector::Class(class.to_string()));
        }
        if let Some(id) = selector.strip_prefix('#') {
            return is_ident(id).then(|| Selector::Id(id.to_string()));
        }
        if let Some(inner) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let (name, value) = inner.split_once('=')?;
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            return Some(Selector::Attr(name.trim().to_lowercase(), value.to_string()));
        }
        is_ident(selector).then(|| Selector::Tag(selector.to_lowercase()))
    }

    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_element() {
            return false;
        }
        match self {
            Selector::Tag(tag) => node.tag_name() == *tag,
            Selector::Class(class) => node.has_class(class),
            Selector::Id(id) => node.id() == Some(id.as_str()),
            Selector::Attr(name, value) => node.attr(name) == Some(value.as_str()),
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Locates the main content of a document.
pub struct Locator<'a> {
    filter: &'a ContentFilter,
    site: &'a SiteProfile,
}

impl<'a> Locator<'a> {
    pub fn new(filter: &'a ContentFilter, site: &'a SiteProfile) -> Self {
        Self { filter, site }
    }

    /// Select the single subtree most likely to hold the primary content.
    pub fn locate<'d>(&self, document: &'d Document) -> &'d Node {
        let root = document.root();

        if let Some(node) = self.first_match(root, LANDMARK_SELECTORS) {
            debug!(tag = %node.tag_name(), "main content: semantic landmark");
            return node;
        }

        if let Some(node) = self.first_match(root, CONTAINER_SELECTORS) {
            debug!(tag = %node.tag_name(), "main content: common container");
            return node;
        }

        if let Some(node) = self.site_override(document) {
            debug!(tag = %node.tag_name(), "main content: site-specific container");
            return node;
        }

        if let Some(node) = self.longest_text_block(document.body()) {
            debug!(tag = %node.tag_name(), "main content: longest text block");
            return node;
        }

        debug!("main content: document body");
        document.body()
    }

    /// Site-specific containers, preferring the nearest wrapping list
    /// container when there is one. Filtered wrappers are passed over.
    fn site_override<'d>(&self, document: &'d Document) -> Option<&'d Node> {
        let host = document.host()?;
        if !self.site.matches_host(&host) {
            return None;
        }

        let list_containers: Vec<Selector> = self
            .site
            .list_container_selectors
            .iter()
            .filter_map(|s| Selector::parse(s))
            .collect();

        self.site
            .content_selectors
            .iter()
            .filter_map(|s| Selector::parse(s))
            .find_map(|selector| {
                let path = self.path_to_first(document.root(), &selector)?;
                let (found, ancestors) = path.split_last()?;
                let wrapper = ancestors.iter().rev().find(|a| {
                    list_containers.iter().any(|l| l.matches(a)) && !self.filter.should_skip(a)
                });
                Some(wrapper.copied().unwrap_or(*found))
            })
    }

    /// Among all unfiltered div/section/article/main elements, the one with
    /// the most visible text. Ties keep the first in document order.
    fn longest_text_block<'d>(&self, root: &'d Node) -> Option<&'d Node> {
        let mut best: Option<(&'d Node, usize)> = None;
        self.scan(root, &mut best);
        best.filter(|(_, len)| *len > 0).map(|(node, _)| node)
    }

    fn scan<'d>(&self, node: &'d Node, best: &mut Option<(&'d Node, usize)>) {
        if !node.is_element() || self.filter.should_skip(node) {
            return;
        }

        if matches!(node.tag(), Tag::Div | Tag::Section | Tag::Article | Tag::Main) {
            let len = self.filter.visible_text(node).chars().count();
            trace!(tag = %node.tag_name(), len, "candidate");
            if best.map_or(true, |(_, best_len)| len > best_len) {
                *best = Some((node, len));
            }
        }

        for child in node.children() {
            self.scan(child, best);
        }
    }

    fn first_match<'d>(&self, root: &'d Node, selectors: &[&str]) -> Option<&'d Node> {
        selectors
            .iter()
            .filter_map(|s| Selector::parse(s))
            .find_map(|selector| self.path_to_first(root, &selector)?.pop())
    }

    /// Path from `node` down to the first element matching `selector` that
    /// the filter keeps. A match the filter would skip renders to nothing.
    fn path_to_first<'d>(&self, node: &'d Node, selector: &Selector) -> Option<Vec<&'d Node>> {
        if selector.matches(node) && !self.filter.should_skip(node) {
            return Some(vec![node]);
        }
        node.children().find_map(|child| {
            let mut path = self.path_to_first(child, selector)?;
            path.insert(0, node);
            Some(path)
        })
    }
}
