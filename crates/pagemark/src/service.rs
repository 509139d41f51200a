//! Extractor - the main entry point for page to Markdown extraction.

use tracing::{debug, trace};
use url::Url;

use crate::cleanup::cleanup;
use crate::convert::{Context, Converter};
use crate::document::Document;
use crate::filter::ContentFilter;
use crate::locate::Locator;
use crate::node::{Node, NodeRef};
use crate::options::ExtractOptions;
use crate::rules::{Rule, Rules};
use crate::utilities::word_count;

/// The main service for extracting Markdown from a document
pub struct Extractor {
    options: ExtractOptions,
    rules: Rules,
    filter: ContentFilter,
}

impl Extractor {
    /// Create a new Extractor with default options
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an Extractor with custom options
    pub fn with_options(options: ExtractOptions) -> Self {
        let filter = ContentFilter::new(&options);
        Self {
            options,
            rules: Rules::new(),
            filter,
        }
    }

    /// Get the current options
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Add a custom rule, consulted before the built-in ones.
    ///
    /// Adding a rule under an existing key replaces it.
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Extract the main content of a document as Markdown.
    ///
    /// When the located content is shorter than `min_words`, the whole
    /// body is converted instead. This happens at most once.
    pub fn extract(&self, document: &Document) -> String {
        let root = Locator::new(&self.filter, &self.options.site).locate(document);
        let base_url = document.base_url();

        let markdown = self.convert(root, base_url.as_ref());
        let words = word_count(&markdown);
        debug!(words, tag = %root.tag_name(), "extracted main content");

        if words < self.options.min_words && !document.is_body(root) {
            debug!(
                words,
                min_words = self.options.min_words,
                "main content too short, converting the document body"
            );
            return self.convert(document.body(), base_url.as_ref());
        }

        markdown
    }

    /// Convert a subtree as-is, without locating main content.
    pub fn convert(&self, node: &Node, base_url: Option<&Url>) -> String {
        let ctx = Context::new(self.options.compact, base_url);
        let raw = Converter::new(&self.rules, &self.filter).render(NodeRef::new(node), &ctx);
        trace!(len = raw.len(), "raw markdown");
        cleanup(&raw, self.options.compact)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
