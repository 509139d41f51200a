//! Built-in Markdown rules.
//!
//! Every rule receives the element, its already rendered children and the
//! conversion context. Block-level rules end their fragment with a blank
//! line; inline rules add no surrounding whitespace.

#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Filter, Rule};
use crate::convert::Context;
use crate::latex::looks_like_latex;
use crate::math::{is_block_display, to_latex};
use crate::node::Node;
use crate::tag::Tag;
use crate::utilities::{collapse_whitespace, is_block, resolve_url};

static RE_BARE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("RE_BARE_WORD regex"));
static RE_CAPS_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").expect("RE_CAPS_DIGITS regex"));

/// Create all built-in rules
pub fn markdown_rules() -> Vec<Rule> {
    vec![
        ignored_rule(),
        heading_rule(),
        paragraph_rule(),
        line_break_rule(),
        horizontal_rule(),
        emphasis_rule(),
        code_rule(),
        pre_rule(),
        blockquote_rule(),
        list_rule(),
        list_item_rule(),
        link_rule(),
        image_rule(),
        math_rule(),
        table_rule(),
        table_row_rule(),
        table_cell_rule(),
        span_rule(),
        container_rule(),
    ]
}

/// Spans rendered by a math engine (KaTeX, MathJax) or flagged as math
pub fn is_math_span(node: &Node) -> bool {
    node.has_attr("data-math")
        || node.has_attr("data-tex")
        || node.classes().any(|class| {
            let class = class.to_lowercase();
            class.contains("math") || class.contains("katex")
        })
}

fn ignored_rule() -> Rule {
    Rule::new(Filter::predicate(|node| node.tag().is_ignored()), |_, _, _| String::new())
}

fn heading_rule() -> Rule {
    Rule::new(
        Filter::predicate(|node| matches!(node.tag(), Tag::Heading(_))),
        |node, content, _| {
            let Tag::Heading(level) = node.tag() else {
                return content.to_string();
            };
            let content = content.trim();
            if content.is_empty() {
                return String::new();
            }
            format!("{} {}\n\n", "#".repeat(usize::from(level)), content)
        },
    )
}

fn paragraph_rule() -> Rule {
    Rule::for_tag(Tag::P, |_, content, _| block(content))
}

fn line_break_rule() -> Rule {
    Rule::for_tag(Tag::Br, |_, _, _| "\n".to_string())
}

fn horizontal_rule() -> Rule {
    Rule::for_tag(Tag::Hr, |_, _, _| "---\n\n".to_string())
}

/// Bold and italic, unless the markup is really math.
///
/// Pages mark up variables and exponents with `<b>`/`<i>`: `x<b>2</b>` is
/// x squared, not an emphasized 2. Such content renders plain, or as a
/// superscript for bold glued to a preceding word.
fn emphasis_rule() -> Rule {
    Rule::for_tags(&[Tag::Strong, Tag::B, Tag::Em, Tag::I], |node, content, ctx| {
        let bold = node.tag().emphasis() == Some(true);
        let content = content.trim();
        if content.is_empty() {
            return String::new();
        }

        let after_word = node.prev_ends_with_word_char();
        let reads_as_math = ctx.in_math
            || looks_like_latex(content)
            || RE_BARE_WORD.is_match(content)
            || (after_word && RE_CAPS_DIGITS.is_match(content));

        match (reads_as_math, bold) {
            (true, true) if after_word => format!("^{{{content}}}"),
            (true, _) => content.to_string(),
            (false, true) => format!("**{content}**"),
            (false, false) => format!("*{content}*"),
        }
    })
}

fn code_rule() -> Rule {
    Rule::for_tag(Tag::Code, |node, _, _| {
        let text = node.text_content();
        if node.parent_tag() == Some(Tag::Pre) {
            return text;
        }

        let text = collapse_whitespace(&text);
        let text = text.trim();
        if text.is_empty() {
            String::new()
        } else if text.contains('`') {
            format!("`` {text} ``")
        } else {
            format!("`{text}`")
        }
    })
}

fn pre_rule() -> Rule {
    Rule::for_tag(Tag::Pre, |node, _, _| {
        let code = node.node.element_children().find(|c| c.tag() == Tag::Code);
        let (text, language) = match code {
            Some(code) => (
                code.text_content(),
                code.classes().find_map(|c| c.strip_prefix("language-")).unwrap_or(""),
            ),
            None => (node.text_content(), ""),
        };

        let text = text.trim_matches('\n');
        if text.trim().is_empty() {
            return String::new();
        }
        format!("```{language}\n{text}\n```\n\n")
    })
}

fn blockquote_rule() -> Rule {
    Rule::for_tag(Tag::Blockquote, |_, content, _| {
        let content = content.trim();
        if content.is_empty() {
            return String::new();
        }
        let quoted: Vec<String> = content
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect();
        format!("{}\n\n", quoted.join("\n"))
    })
}

fn list_rule() -> Rule {
    Rule::for_tags(&[Tag::Ul, Tag::Ol], |_, content, _| {
        if content.trim().is_empty() {
            String::new()
        } else {
            format!("{content}\n")
        }
    })
}

fn list_item_rule() -> Rule {
    Rule::for_tag(Tag::Li, |node, content, _| {
        let content = content.trim();
        if content.is_empty() {
            return String::new();
        }
        let prefix = if node.parent_tag() == Some(Tag::Ol) { "1. " } else { "- " };
        format!("{prefix}{content}\n")
    })
}

fn link_rule() -> Rule {
    Rule::for_tag(Tag::A, |node, content, ctx| {
        let text = content.trim();
        let Some(href) = node.attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            return text.to_string();
        };
        if text.is_empty() {
            return String::new();
        }
        if href == "#" || href.to_ascii_lowercase().starts_with("javascript:") {
            return text.to_string();
        }

        let url = resolve_url(href, ctx.base_url);
        if text == href || text == url {
            text.to_string()
        } else {
            format!("[{text}]({url})")
        }
    })
}

fn image_rule() -> Rule {
    Rule::for_tag(Tag::Img, |node, _, ctx| {
        let nonempty = |name: &str| node.attr(name).map(str::trim).filter(|v| !v.is_empty());

        let Some(src) = nonempty("src").or_else(|| nonempty("data-src")) else {
            return String::new();
        };
        let alt = nonempty("alt").unwrap_or("image");
        format!("![{alt}]({})\n\n", resolve_url(src, ctx.base_url))
    })
}

fn math_rule() -> Rule {
    Rule::for_tag(Tag::Math, |node, _, ctx| {
        let latex = to_latex(node.node, ctx.compact);
        if is_block_display(node.node) && !ctx.compact {
            format!("{latex}\n\n")
        } else {
            latex
        }
    })
}

/// Reassemble rendered rows into a Markdown table with a separator after
/// the first row. Non-row lines (captions) go in front of the table.
fn table_rule() -> Rule {
    Rule::for_tag(Tag::Table, |_, content, _| {
        let (rows, other): (Vec<&str>, Vec<&str>) = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .partition(|line| line.contains('|'));

        let Some((header, body)) = rows.split_first() else {
            return block(&other.join(" "));
        };

        let header = normalize_row(header);
        let separator = format!("|{}", " --- |".repeat(count_cells(&header)));

        let mut lines = vec![header, separator];
        lines.extend(body.iter().map(|row| normalize_row(row)));

        let mut table = String::new();
        if !other.is_empty() {
            table.push_str(&block(&other.join(" ")));
        }
        table.push_str(&lines.join("\n"));
        table.push_str("\n\n");
        table
    })
}

fn table_row_rule() -> Rule {
    Rule::for_tag(Tag::Tr, |_, content, _| {
        if content.trim().is_empty() {
            String::new()
        } else {
            format!("|{}\n", content.trim_end())
        }
    })
}

fn table_cell_rule() -> Rule {
    Rule::for_tags(&[Tag::Th, Tag::Td], |_, content, _| {
        let cell = content.trim().replace('|', "\\|").replace('\n', " ");
        format!(" {cell} |")
    })
}

fn span_rule() -> Rule {
    Rule::for_tag(Tag::Span, |node, content, ctx| {
        if ctx.compact && (is_math_span(node.node) || looks_like_latex(content)) {
            content.replace('$', "")
        } else {
            content.to_string()
        }
    })
}

/// Containers keep their structure when they hold block children;
/// otherwise their text is one paragraph.
fn container_rule() -> Rule {
    Rule::new(Filter::predicate(|node| node.tag().is_container()), |node, content, _| {
        let has_block_child = node
            .node
            .element_children()
            .any(|child| is_block(&child.tag_name()));
        if has_block_child {
            content.to_string()
        } else {
            block(content)
        }
    })
}

/// Trimmed content followed by a blank line, or nothing
fn block(content: &str) -> String {
    let content = content.trim();
    if content.is_empty() {
        String::new()
    } else {
        format!("{content}\n\n")
    }
}

fn normalize_row(row: &str) -> String {
    let mut row = row.trim().to_string();
    if !row.starts_with('|') {
        row.insert(0, '|');
    }
    if !row.ends_with('|') || row.ends_with("\\|") {
        row.push('|');
    }
    row
}

/// Cells in a normalized row: unescaped pipes minus one
fn count_cells(row: &str) -> usize {
    let mut pipes: usize = 0;
    let mut escaped = false;
    for c in row.chars() {
        match c {
            '\\' => escaped = !escaped,
            '|' if !escaped => pipes += 1,
            _ => escaped = false,
        }
    }
    pipes.saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeRef;

    fn ctx() -> Context<'static> {
        Context::new(false, None)
    }

    fn apply(node: &Node, content: &str, ctx: &Context) -> String {
        let node_ref = NodeRef::new(node);
        let rules = markdown_rules();
        let rule = rules.iter().find(|r| r.filter.matches(&node_ref));
        rule.map(|r| r.replace(&node_ref, content, ctx))
            .unwrap_or_else(|| content.to_string())
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(apply(&Node::element("h1"), " Title ", &ctx()), "# Title\n\n");
        assert_eq!(apply(&Node::element("h4"), "Deep", &ctx()), "#### Deep\n\n");
        assert_eq!(apply(&Node::element("h2"), "  ", &ctx()), "");
    }

    #[test]
    fn test_paragraph_and_breaks() {
        assert_eq!(apply(&Node::element("p"), " text ", &ctx()), "text\n\n");
        assert_eq!(apply(&Node::element("p"), "", &ctx()), "");
        assert_eq!(apply(&Node::element("br"), "", &ctx()), "\n");
    }

    #[test]
    fn test_emphasis_markers() {
        assert_eq!(apply(&Node::element("strong"), "very bold", &ctx()), "**very bold**");
        assert_eq!(apply(&Node::element("em"), "two words", &ctx()), "*two words*");
        assert_eq!(apply(&Node::element("b"), "", &ctx()), "");
    }

    #[test]
    fn test_emphasis_reads_as_math() {
        // A single bare word is a variable, not emphasis
        assert_eq!(apply(&Node::element("i"), "x", &ctx()), "x");
        // LaTeX-looking content
        assert_eq!(apply(&Node::element("b"), "a_{i} b", &ctx()), "a_{i} b");

        // Bold glued to a word is an exponent
        let parent = Node::element("p");
        let prev = Node::text("q");
        let bold = Node::element("b");
        let node = NodeRef::child(&bold, &parent, Some(&prev));
        let rules = markdown_rules();
        let rule = rules.iter().find(|r| r.filter.matches(&node));
        assert_eq!(rule.map(|r| r.replace(&node, "S", &ctx())).as_deref(), Some("^{S}"));

        // Inside a math span nothing is emphasis
        let in_math = Context {
            in_math: true,
            ..ctx()
        };
        assert_eq!(apply(&Node::element("em"), "two words", &in_math), "two words");
    }

    #[test]
    fn test_inline_code() {
        let code = Node::element("code").with_child(Node::text("let  x"));
        assert_eq!(apply(&code, "", &ctx()), "`let x`");

        let ticks = Node::element("code").with_child(Node::text("a`b"));
        assert_eq!(apply(&ticks, "", &ctx()), "`` a`b ``");
    }

    #[test]
    fn test_code_inside_pre_is_raw() {
        let pre = Node::element("pre");
        let code = Node::element("code").with_child(Node::text("  indented\n"));
        let node = NodeRef::child(&code, &pre, None);
        let rules = markdown_rules();
        let rule = rules.iter().find(|r| r.filter.matches(&node));
        assert_eq!(rule.map(|r| r.replace(&node, "", &ctx())).as_deref(), Some("  indented\n"));
    }

    #[test]
    fn test_fenced_code_block() {
        let pre = Node::element("pre").with_child(
            Node::element_with_attrs("code", vec![("class", "hljs language-rust")])
                .with_child(Node::text("fn main() {\n    run();\n}\n")),
        );
        assert_eq!(
            apply(&pre, "", &ctx()),
            "```rust\nfn main() {\n    run();\n}\n```\n\n"
        );

        let bare = Node::element("pre").with_child(Node::text("plain"));
        assert_eq!(apply(&bare, "", &ctx()), "```\nplain\n```\n\n");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            apply(&Node::element("blockquote"), "line one\n\nline two\n\n", &ctx()),
            "> line one\n>\n> line two\n\n"
        );
    }

    #[test]
    fn test_list_items() {
        let ol = Node::element("ol");
        let ul = Node::element("ul");
        let li = Node::element("li");
        let rules = markdown_rules();
        let render = |parent: &Node, content: &str| {
            let node = NodeRef::child(&li, parent, None);
            rules
                .iter()
                .find(|r| r.filter.matches(&node))
                .map(|r| r.replace(&node, content, &ctx()))
        };
        assert_eq!(render(&ul, " one ").as_deref(), Some("- one\n"));
        assert_eq!(render(&ol, "first").as_deref(), Some("1. first\n"));
        assert_eq!(render(&ul, "  ").as_deref(), Some(""));
        assert_eq!(apply(&ul, "- one\n", &ctx()), "- one\n\n");
    }

    #[test]
    fn test_links() {
        let base = url::Url::parse("https://example.com/blog/post").ok();
        let ctx = Context::new(false, base.as_ref());

        let a = Node::element_with_attrs("a", vec![("href", "../about")]);
        assert_eq!(apply(&a, "About", &ctx), "[About](https://example.com/about)");

        let same = Node::element_with_attrs("a", vec![("href", "https://example.com/x")]);
        assert_eq!(apply(&same, "https://example.com/x", &ctx), "https://example.com/x");

        assert_eq!(apply(&Node::element("a"), "no target", &ctx), "no target");
        assert_eq!(apply(&a, " ", &ctx), "");

        let js = Node::element_with_attrs("a", vec![("href", "javascript:void(0)")]);
        assert_eq!(apply(&js, "Click", &ctx), "Click");
    }

    #[test]
    fn test_images() {
        let base = url::Url::parse("https://example.com/blog/").ok();
        let ctx = Context::new(false, base.as_ref());

        let img = Node::element_with_attrs("img", vec![("src", "pic.png"), ("alt", "A cat")]);
        assert_eq!(apply(&img, "", &ctx), "![A cat](https://example.com/blog/pic.png)\n\n");

        let no_alt = Node::element_with_attrs("img", vec![("src", "/p.png")]);
        assert_eq!(apply(&no_alt, "", &ctx), "![image](https://example.com/p.png)\n\n");

        let lazy = Node::element_with_attrs("img", vec![("src", ""), ("data-src", "l.png")]);
        assert_eq!(apply(&lazy, "", &ctx), "![image](https://example.com/blog/l.png)\n\n");

        assert_eq!(apply(&Node::element("img"), "", &ctx), "");
    }

    #[test]
    fn test_table_reassembly() {
        let table = Node::element("table");
        let content = "| A | B |\n| 1 | 2 |\n";
        assert_eq!(
            apply(&table, content, &ctx()),
            "| A | B |\n| --- | --- |\n| 1 | 2 |\n\n"
        );

        assert_eq!(apply(&Node::element("tr"), " a | b |", &ctx()), "| a | b |\n");
        assert_eq!(apply(&Node::element("td"), " x|y \n z", &ctx()), " x\\|y   z |");
        assert_eq!(count_cells("| a \\| b | c |"), 2);
        assert_eq!(count_cells(""), 1);
    }

    #[test]
    fn test_math_span_compact() {
        let span = Node::element_with_attrs("span", vec![("class", "katex")]);
        let compact = Context::new(true, None);
        assert_eq!(apply(&span, "$x^2$", &compact), "x^2");
        assert_eq!(apply(&span, "$x^2$", &ctx()), "$x^2$");
        assert_eq!(apply(&Node::element("span"), "$5 and $", &compact), "5 and ");
        assert_eq!(apply(&Node::element("span"), "plain", &compact), "plain");
    }

    #[test]
    fn test_containers() {
        let with_block = Node::element("div").with_child(Node::element("p"));
        assert_eq!(apply(&with_block, "para\n\n", &ctx()), "para\n\n");

        let inline_only = Node::element("section").with_child(Node::element("span"));
        assert_eq!(apply(&inline_only, " loose text ", &ctx()), "loose text\n\n");
    }

    #[test]
    fn test_ignored_tags() {
        assert_eq!(apply(&Node::element("script"), "alert(1)", &ctx()), "");
        assert_eq!(apply(&Node::element("button"), "Click", &ctx()), "");
    }
}
