//! Heuristics for LaTeX-looking text.
//!
//! Pages often write exponents as `x**2` or render them with `<b>` instead of
//! `<sup>`. These regex passes recover the mathematical reading when the
//! pattern is unambiguous. They are heuristics, not a parser: genuine bold
//! text that happens to match (`the**answer**`) is rewritten too.

#![allow(clippy::expect_used)]

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LATEX: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // \command{arg}
        r"\\[a-zA-Z]+\{[^}]*\}",
        // word_{...} / word^{...}
        r"\w_\{[^}]*\}",
        r"\w\^\{[^}]*\}",
        // bare x_1 / x^2
        r"\w[_^]\w",
        // \command
        r"\\[a-zA-Z]+",
        // $$...$$ / $...$
        r"\$\$[^$]+\$\$",
        r"\$[^$]+\$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("RE_LATEX regex"))
    .collect()
});

static RE_WORD_POW_CAPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)\*\*([A-Z]+)").expect("RE_WORD_POW_CAPS regex"));
static RE_WORD_POW_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)\*\*(\w+)").expect("RE_WORD_POW_WORD regex"));
static RE_WORD_SUB_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)__(\w+)").expect("RE_WORD_SUB_WORD regex"));
static RE_BOLD_CAPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([A-Z]+)\*\*").expect("RE_BOLD_CAPS regex"));
static RE_DUNDER_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([^_]+)__").expect("RE_DUNDER_TEXT regex"));

static RE_DISPLAY_DELIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$([^$]+)\$\$").expect("RE_DISPLAY_DELIM regex"));
static RE_INLINE_DELIM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([^$]+)\$").expect("RE_INLINE_DELIM regex"));

/// Whether the text already looks like LaTeX source.
pub fn looks_like_latex(text: &str) -> bool {
    RE_LATEX.iter().any(|re| re.is_match(text))
}

/// Rewrite exponent/subscript shorthand that is adjacent to a word
/// character: `x**CAPS`, `x**word`, `x__word`.
pub fn repair_adjacent_scripts(text: &str) -> String {
    let text = RE_WORD_POW_CAPS.replace_all(text, "${1}^{${2}}");
    let text = RE_WORD_POW_WORD.replace_all(&text, "${1}^{${2}}");
    RE_WORD_SUB_WORD.replace_all(&text, "${1}_{${2}}").into_owned()
}

/// Rewrite emphasis-looking markers that are really scripts.
///
/// The rewrites run in a fixed order and each one sees the output of the
/// previous one.
pub fn repair_latex_artifacts(text: &str) -> String {
    let text = repair_adjacent_scripts(text);
    let text = RE_BOLD_CAPS.replace_all(&text, "^{${1}}");
    RE_DUNDER_TEXT.replace_all(&text, "_{${1}}").into_owned()
}

/// Drop `$$`/`$` delimiters, keeping display math on its own paragraph.
pub fn strip_delimiters(text: &str) -> String {
    let text = RE_DISPLAY_DELIM.replace_all(text, "\n\n${1}\n\n");
    RE_INLINE_DELIM.replace_all(&text, "${1}").into_owned()
}
