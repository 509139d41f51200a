//! Post-processing of the raw transducer output.
//!
//! A fixed sequence of string rewrites that repair spacing and Markdown
//! artifacts left behind by concatenating fragments. The order matters:
//! later passes assume the earlier ones already ran. Code, link targets and
//! `$`-delimited math are stashed behind placeholders while prose is
//! rewritten and restored verbatim at the end. Bare URLs and LaTeX-looking
//! tokens (`\cmd{..}`, `x_{..}`, `f(x,y)`) are stashed too, since compact
//! mode has already dropped their `$` delimiters by the time cleanup runs.

#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::latex::repair_latex_artifacts;

static RE_PROTECTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)```.*?```|``[^\n]+?``|`[^`\n]+`",
        r"|\$\$[^$]+\$\$|\$[^$\n]+\$",
        r"|https?://[^\s)\]]*[^\s)\].,;:!?]",
        r"|\\[A-Za-z]+(?:\{[^{}\n]*\})*",
        r"|\w[_^]\{[^{}\n]*\}",
        r"|\w\([^()\s]+\)",
    ))
    .expect("RE_PROTECTED regex")
});
static RE_LINK_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\(([^)\s]+)\)").expect("RE_LINK_TARGET regex"));

static RE_FOUR_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{4,}").expect("RE_FOUR_NEWLINES regex"));
static RE_THREE_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("RE_THREE_NEWLINES regex"));
static RE_TRAILING_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+\n").expect("RE_TRAILING_WS regex"));
static RE_LEADING_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]+").expect("RE_LEADING_WS regex"));
static RE_MULTI_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("RE_MULTI_SPACE regex"));

static RE_SENTENCE_JOIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])([A-Z])").expect("RE_SENTENCE_JOIN regex"));
static RE_CAMEL_JOIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("RE_CAMEL_JOIN regex"));
static RE_SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([,.;:?])").expect("RE_SPACE_BEFORE_PUNCT regex"));
static RE_PUNCT_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([,;:])([A-Za-z])").expect("RE_PUNCT_WORD regex"));

static RE_ROW_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+\|[ \t]*\n").expect("RE_ROW_END regex"));
static RE_ADJACENT_PIPES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|{2,}").expect("RE_ADJACENT_PIPES regex"));

static RE_EMPTY_LINK_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(^|[^!])[ \t]*\[\s*\]\([^)]*\)").expect("RE_EMPTY_LINK_TEXT regex")
});
static RE_EMPTY_LINK_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(\s*\)").expect("RE_EMPTY_LINK_TARGET regex"));

static RE_SENTENCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])\n([A-Z])").expect("RE_SENTENCE_LINE regex"));

/// Placeholder delimiters are drawn from the private use area
const PRIVATE_USE: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

/// Regions that must survive cleanup untouched.
///
/// A placeholder is `open`, the region index, then `close`. The pair is
/// chosen so that neither char occurs in the input; when every pair is
/// taken nothing is protected.
#[derive(Default)]
struct Stash {
    delimiters: Option<(char, char)>,
    regions: Vec<String>,
}

impl Stash {
    fn protect(&mut self, text: &str) -> String {
        self.delimiters = PRIVATE_USE
            .step_by(2)
            .filter_map(|c| Some((char::from_u32(c)?, char::from_u32(c + 1)?)))
            .find(|&(open, close)| !text.contains(open) && !text.contains(close));
        if self.delimiters.is_none() {
            return text.to_string();
        }

        let text = RE_PROTECTED.replace_all(text, |caps: &Captures| self.push(&caps[0]));
        RE_LINK_TARGET
            .replace_all(&text, |caps: &Captures| format!("]({})", self.push(&caps[1])))
            .into_owned()
    }

    fn push(&mut self, region: &str) -> String {
        self.regions.push(region.to_string());
        match self.delimiters {
            Some((open, close)) => format!("{open}{}{close}", self.regions.len() - 1),
            None => region.to_string(),
        }
    }

    /// A region only refers to regions stashed before it, so expanding them
    /// in order leaves every region fully restored.
    fn restore(&self, text: &str) -> String {
        let Some((open, close)) = self.delimiters else {
            return text.to_string();
        };
        let mut expanded: Vec<String> = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let region = expand(region, open, close, &expanded);
            expanded.push(region);
        }
        expand(text, open, close, &expanded)
    }
}

/// Replace every placeholder with its region. Placeholders with an unknown
/// index are kept as they are.
fn expand(text: &str, open: char, close: char, regions: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after = &rest[start + open.len_utf8()..];
        let digits = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        let region = after[..digits]
            .parse::<usize>()
            .ok()
            .and_then(|i| regions.get(i));
        match region {
            Some(region) if after[digits..].starts_with(close) => {
                out.push_str(region);
                rest = &after[digits + close.len_utf8()..];
            }
            _ => {
                out.push(open);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Repair the concatenated Markdown fragments.
///
/// In compact mode every `$$`/`$` delimiter is removed at the end.
pub fn cleanup(raw: &str, compact: bool) -> String {
    let mut stash = Stash::default();
    let text = stash.protect(raw);

    // Structure
    let text = RE_FOUR_NEWLINES.replace_all(&text, "\n\n\n");
    let text = RE_TRAILING_WS.replace_all(&text, "\n");
    let text = RE_LEADING_WS.replace_all(&text, "\n");
    let text = RE_MULTI_SPACE.replace_all(&text, " ");

    // Sentence and word spacing
    let text = RE_SENTENCE_JOIN.replace_all(&text, "${1} ${2}");
    let text = RE_CAMEL_JOIN.replace_all(&text, "${1} ${2}");
    let text = RE_SPACE_BEFORE_PUNCT.replace_all(&text, "${1}");
    let text = RE_PUNCT_WORD.replace_all(&text, "${1} ${2}");

    // Markdown artifacts
    let text = RE_ROW_END.replace_all(&text, " |\n");
    let text = RE_ADJACENT_PIPES.replace_all(&text, "|");
    let text = RE_EMPTY_LINK_TEXT.replace_all(&text, "${1}");
    let text = RE_EMPTY_LINK_TARGET.replace_all(&text, "${1}");
    let text = repair_latex_artifacts(&text);

    let text = RE_SENTENCE_LINE.replace_all(&text, "${1}\n\n${2}");
    let text = text.lines().map(str::trim).collect::<Vec<_>>().join("\n");
    let text = RE_THREE_NEWLINES.replace_all(&text, "\n\n");

    let text = stash.restore(text.trim());
    if !compact {
        return text;
    }

    let text = text.replace("$$", "").replace('$', "");
    RE_THREE_NEWLINES.replace_all(&text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_collapse_and_trim() {
        assert_eq!(cleanup("\n\n# Title\n\n\n\n\nBody  \n   text\n\n", false), "# Title\n\nBody\ntext");
    }

    #[test]
    fn test_sentence_and_camel_spacing() {
        assert_eq!(cleanup("The end.Next one", false), "The end. Next one");
        assert_eq!(cleanup("readMore", false), "read More");
        assert_eq!(cleanup("first , second ;third", false), "first, second; third");
    }

    #[test]
    fn test_table_pipes() {
        assert_eq!(
            cleanup("| a |   \n| --- |\n| b || c |\n", false),
            "| a |\n| --- |\n| b | c |"
        );
    }

    #[test]
    fn test_empty_links_removed() {
        assert_eq!(cleanup("see [](https://x.test/a) here", false), "see here");
        assert_eq!(cleanup("[label]()", false), "label");
        assert_eq!(cleanup("![image](https://x.test/i.png)", false), "![image](https://x.test/i.png)");
    }

    #[test]
    fn test_link_targets_untouched() {
        assert_eq!(
            cleanup("[docs](https://x.test/getStarted?a=1,b)", false),
            "[docs](https://x.test/getStarted?a=1,b)"
        );
    }

    #[test]
    fn test_code_untouched() {
        let raw = "Run `cargo  fmt` now.\n\n```rust\nfn main() {\n    let a = 1 , b;\n}\n```\n\n";
        assert_eq!(
            cleanup(raw, false),
            "Run `cargo  fmt` now.\n\n```rust\nfn main() {\n    let a = 1 , b;\n}\n```"
        );
    }

    #[test]
    fn test_exponent_repair() {
        assert_eq!(cleanup("q**S", false), "q^{S}");
        assert_eq!(cleanup("**bold**", false), "**bold**");
        assert_eq!(cleanup("a **API** call", false), "a ^{API} call");
        assert_eq!(cleanup("x __n__ y", false), "x _{n} y");
    }

    #[test]
    fn test_paragraph_after_sentence() {
        assert_eq!(cleanup("One.\nTwo", false), "One.\n\nTwo");
    }

    #[test]
    fn test_compact_strips_delimiters() {
        let raw = "Value $x_{i}$ here\n\n$$E = mc^{2}$$\n\n";
        assert_eq!(cleanup(raw, false), "Value $x_{i}$ here\n\n$$E = mc^{2}$$");
        let compact = cleanup(raw, true);
        assert!(!compact.contains('$'));
        assert_eq!(compact, "Value x_{i} here\n\nE = mc^{2}");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "# Title\n\n\n\nSome text.Next sentence  here\n\n- item one\n- item two\n\n",
            "| A | B |\n| --- | --- |\n| 1 || 2 |\n\n[](x) and [t]()",
            "Energy x**2 and $$\\frac{a}{b}$$\n\n```\n  code\n```\n",
            "> quote line\n>\n> second.Line",
            "The unit is \\mathrm{MeV} for f(x,y) and x_{i}.",
            "The unit is $\\mathrm{MeV}$ for $f(x,y)$ and $x_{i}$.",
            "Visit https://example.com/getStarted now.Then [docs](https://x.test/a,b)",
        ];
        for sample in samples {
            for compact in [false, true] {
                let once = cleanup(sample, compact);
                assert_eq!(cleanup(&once, compact), once, "sample {sample:?}");
            }
        }
    }

    #[test]
    fn test_private_use_text_survives() {
        assert_eq!(cleanup("see `\u{E000}0\u{E001}` here", false), "see `\u{E000}0\u{E001}` here");
        assert_eq!(cleanup("icon \u{E000}1\u{E001} and `a  b`", false), "icon \u{E000}1\u{E001} and `a  b`");
    }

    #[test]
    fn test_placeholder_pairs_exhausted() {
        let icons: String = (0xE000..=0xF8FF).filter_map(char::from_u32).collect();
        let raw = format!("{icons} readMore");
        assert_eq!(cleanup(&raw, false), format!("{icons} read More"));
    }

    #[test]
    fn test_latex_tokens_untouched() {
        assert_eq!(cleanup("The unit is \\mathrm{MeV} here", true), "The unit is \\mathrm{MeV} here");
        assert_eq!(cleanup("Take f(x,y) and x_{i}", true), "Take f(x,y) and x_{i}");
        assert_eq!(cleanup("$f(x,y)$ here", true), "f(x,y) here");
    }

    #[test]
    fn test_bare_urls_untouched() {
        assert_eq!(
            cleanup("Visit https://example.com/getStarted now.Then go", false),
            "Visit https://example.com/getStarted now. Then go"
        );
        assert_eq!(cleanup("See https://x.test/a.", false), "See https://x.test/a.");
    }
}
