//! Recursive tree-to-Markdown conversion.
//!
//! Every node renders to a fragment. Elements first render their children,
//! then hand the joined content to the matching rule.

use url::Url;

use crate::filter::ContentFilter;
use crate::latex::{looks_like_latex, repair_latex_artifacts, strip_delimiters};
use crate::node::{Node, NodeRef, NodeType};
use crate::rules::{is_math_span, Rules};
use crate::tag::Tag;
use crate::utilities::{collapse_whitespace, is_block};

/// Conversion state passed down the tree
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Strip math delimiters and Markdown noise for plain-text consumers
    pub compact: bool,
    /// Base for resolving relative link and image targets
    pub base_url: Option<&'a Url>,
    /// Inside an element rendered by a math engine
    pub in_math: bool,
}

impl<'a> Context<'a> {
    pub fn new(compact: bool, base_url: Option<&'a Url>) -> Self {
        Self {
            compact,
            base_url,
            in_math: false,
        }
    }
}

/// Renders nodes with a rule table, skipping filtered chrome
pub struct Converter<'r> {
    rules: &'r Rules,
    filter: &'r ContentFilter,
}

impl<'r> Converter<'r> {
    pub fn new(rules: &'r Rules, filter: &'r ContentFilter) -> Self {
        Self { rules, filter }
    }

    /// Render a node and its subtree to a raw Markdown fragment
    pub fn render(&self, node: NodeRef, ctx: &Context) -> String {
        match node.node.node_type {
            NodeType::Text => render_text(node.node, ctx),
            NodeType::Comment => String::new(),
            NodeType::Document | NodeType::DocumentFragment => self.render_children(node.node, ctx),
            NodeType::Element => self.render_element(node, ctx),
        }
    }

    fn render_element(&self, node: NodeRef, ctx: &Context) -> String {
        if self.filter.should_skip(node.node) {
            return String::new();
        }

        let tag = node.tag();
        let content = if tag.renders_own_content() {
            String::new()
        } else {
            let child_ctx = Context {
                in_math: ctx.in_math || (tag == Tag::Span && is_math_span(node.node)),
                ..*ctx
            };
            self.render_children(node.node, &child_ctx)
        };

        match self.rules.for_node(&node) {
            Some(rule) => rule.replace(&node, &content, ctx),
            None => content,
        }
    }

    fn render_children(&self, parent: &Node, ctx: &Context) -> String {
        let mut out = String::new();
        let mut prev: Option<&Node> = None;

        for child in parent.children() {
            if child.node_type == NodeType::Comment {
                continue;
            }
            let fragment = self.render(NodeRef::child(child, parent, prev), ctx);
            let block = child.is_element() && is_block(&child.tag_name());
            push_fragment(&mut out, &fragment, block);
            prev = Some(child);
        }

        out
    }
}

fn render_text(node: &Node, ctx: &Context) -> String {
    let raw = node.node_value.as_deref().unwrap_or_default();
    let collapsed = collapse_whitespace(raw);
    let text = collapsed.trim();
    if text.is_empty() {
        return String::new();
    }

    let text = repair_latex_artifacts(text);
    if ctx.compact && looks_like_latex(&text) {
        strip_delimiters(&text)
    } else {
        text
    }
}

/// Append a child fragment, separating it from what came before.
///
/// Block fragments start on a new paragraph. Inline fragments get one
/// space unless punctuation or a script marker binds them to the previous
/// text.
fn push_fragment(out: &mut String, fragment: &str, block: bool) {
    if fragment.is_empty() {
        return;
    }

    if let (Some(last), Some(first)) = (out.chars().last(), fragment.chars().next()) {
        if !last.is_whitespace() && !first.is_whitespace() {
            if block {
                out.push_str("\n\n");
            } else if fragment.starts_with("![") || needs_space(last, first) {
                out.push(' ');
            }
        }
    }

    out.push_str(fragment);
}

fn needs_space(last: char, first: char) -> bool {
    !matches!(first, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']' | '}' | '^' | '_')
        && !matches!(last, '(' | '[' | '{')
}
