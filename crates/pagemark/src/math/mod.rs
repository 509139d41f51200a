//! MathML to LaTeX conversion.
//!
//! The converter is total: missing children read as empty strings and
//! unknown elements fall back to their space-joined children, so a
//! malformed formula degrades to partial LaTeX instead of failing the
//! whole extraction.

mod symbols;

pub use symbols::operator_to_latex;

use crate::node::Node;

/// MathML element kinds the converter distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathTag {
    Math,
    Mi,
    Mn,
    Mo,
    Mtext,
    Ms,
    Mspace,
    Msup,
    Msub,
    Msubsup,
    Mfrac,
    Msqrt,
    Mroot,
    Mover,
    Munder,
    Munderover,
    Mrow,
    Mfenced,
    Mtable,
    Mtr,
    Mtd,
    Semantics,
    Annotation,
    Other,
}

impl MathTag {
    pub fn of(node: &Node) -> Self {
        if !node.is_element() {
            return MathTag::Other;
        }
        match node.tag_name().as_str() {
            "math" => MathTag::Math,
            "mi" => MathTag::Mi,
            "mn" => MathTag::Mn,
            "mo" => MathTag::Mo,
            "mtext" => MathTag::Mtext,
            "ms" => MathTag::Ms,
            "mspace" => MathTag::Mspace,
            "msup" => MathTag::Msup,
            "msub" => MathTag::Msub,
            "msubsup" => MathTag::Msubsup,
            "mfrac" => MathTag::Mfrac,
            "msqrt" => MathTag::Msqrt,
            "mroot" => MathTag::Mroot,
            "mover" => MathTag::Mover,
            "munder" => MathTag::Munder,
            "munderover" => MathTag::Munderover,
            "mrow" => MathTag::Mrow,
            "mfenced" => MathTag::Mfenced,
            "mtable" => MathTag::Mtable,
            "mtr" | "mlabeledtr" => MathTag::Mtr,
            "mtd" => MathTag::Mtd,
            "semantics" => MathTag::Semantics,
            "annotation" | "annotation-xml" => MathTag::Annotation,
            _ => MathTag::Other,
        }
    }
}

/// Whether a `<math>` root asks for block (display) layout
pub fn is_block_display(node: &Node) -> bool {
    node.attr("display")
        .or_else(|| node.attr("mode"))
        .is_some_and(|d| matches!(d.trim().to_ascii_lowercase().as_str(), "block" | "display"))
}

/// Render a MathML subtree as LaTeX.
///
/// A `<math>` root is wrapped according to its display attribute: block
/// formulas become `$$...$$` on their own paragraph (bare paragraph in
/// compact mode), inline formulas become `$...$` (bare in compact mode).
pub fn to_latex(node: &Node, compact: bool) -> String {
    if MathTag::of(node) != MathTag::Math {
        return convert(node);
    }

    let inner = join_children(node);
    match (is_block_display(node), compact) {
        (true, false) => format!("\n\n$${inner}$$\n\n"),
        (true, true) => format!("\n\n{inner}\n\n"),
        (false, false) => format!("${inner}$"),
        (false, true) => inner,
    }
}

fn convert(node: &Node) -> String {
    let children: Vec<&Node> = node.element_children().collect();
    let arg = |i: usize| children.get(i).map(|c| convert(c)).unwrap_or_default();

    match MathTag::of(node) {
        MathTag::Mi | MathTag::Mn => node.text_content().trim().to_string(),
        MathTag::Mo => operator_to_latex(node.text_content().trim()).to_string(),
        MathTag::Mtext | MathTag::Ms => {
            let text = node.text_content();
            let text = text.trim();
            if text.is_empty() {
                String::new()
            } else {
                format!("\\text{{{text}}}")
            }
        }
        MathTag::Mspace => r"\,".to_string(),

        MathTag::Msup => format!("{}^{{{}}}", arg(0), arg(1)),
        MathTag::Msub => format!("{}_{{{}}}", arg(0), arg(1)),
        MathTag::Msubsup => format!("{}_{{{}}}^{{{}}}", arg(0), arg(1), arg(2)),

        MathTag::Mfrac => {
            if node.attr("linethickness").is_some_and(|t| t.trim() == "0") {
                format!("\\binom{{{}}}{{{}}}", arg(0), arg(1))
            } else {
                format!("\\frac{{{}}}{{{}}}", arg(0), arg(1))
            }
        }
        MathTag::Msqrt => format!("\\sqrt{{{}}}", join_children(node)),
        MathTag::Mroot if children.len() == 2 => format!("\\sqrt[{}]{{{}}}", arg(1), arg(0)),

        MathTag::Mover if children.len() >= 2 => {
            let base = arg(0);
            let mark = children[1].text_content();
            match mark.trim() {
                "¯" | "‾" | "―" | "_" | "\u{0305}" => format!("\\overline{{{base}}}"),
                "^" | "ˆ" | "\u{0302}" => format!("\\hat{{{base}}}"),
                "~" | "˜" | "\u{0303}" => format!("\\tilde{{{base}}}"),
                "→" | "\u{20D7}" => format!("\\vec{{{base}}}"),
                "˙" | "\u{0307}" => format!("\\dot{{{base}}}"),
                "¨" | "\u{0308}" => format!("\\ddot{{{base}}}"),
                _ => format!("\\overset{{{}}}{{{base}}}", arg(1)),
            }
        }
        MathTag::Munder if children.len() >= 2 => {
            let base = arg(0);
            match children[1].text_content().trim() {
                "_" | "¯" | "\u{0332}" => format!("\\underline{{{base}}}"),
                _ => format!("\\underset{{{}}}{{{base}}}", arg(1)),
            }
        }
        MathTag::Munderover if children.len() >= 3 => {
            format!("{}_{{{}}}^{{{}}}", arg(0), arg(1), arg(2))
        }

        MathTag::Mfenced => {
            let open = node.attr("open").unwrap_or("(");
            let close = node.attr("close").unwrap_or(")");
            let separator = node.attr("separators").map_or(",", str::trim);
            let separator = separator.chars().next().map(String::from).unwrap_or_default();
            let items: Vec<String> = children.iter().map(|c| convert(c)).collect();
            format!("{open}{}{close}", items.join(&separator))
        }
        MathTag::Mtable => {
            let rows: Vec<String> = children.iter().map(|c| convert(c)).collect();
            format!("\\begin{{matrix}} {} \\end{{matrix}}", rows.join(r" \\ "))
        }
        MathTag::Mtr => {
            let cells: Vec<String> = children.iter().map(|c| convert(c)).collect();
            cells.join(" & ")
        }
        MathTag::Semantics => arg(0),
        MathTag::Annotation => String::new(),

        // mrow, mtd, math, degraded mroot/mover/munder/munderover and
        // unknown elements
        _ => join_children(node),
    }
}

fn join_children(node: &Node) -> String {
    node.element_children()
        .map(convert)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
