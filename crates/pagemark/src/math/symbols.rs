//! Operator glyph to LaTeX command table.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static OPERATORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Big operators
        ("∑", r"\sum"),
        ("∏", r"\prod"),
        ("∐", r"\coprod"),
        ("∫", r"\int"),
        ("∬", r"\iint"),
        ("∭", r"\iiint"),
        ("∮", r"\oint"),
        ("⋃", r"\bigcup"),
        ("⋂", r"\bigcap"),
        // Binary operators
        ("±", r"\pm"),
        ("∓", r"\mp"),
        ("×", r"\times"),
        ("÷", r"\div"),
        ("·", r"\cdot"),
        ("⋅", r"\cdot"),
        ("∗", r"\ast"),
        ("∘", r"\circ"),
        ("⊕", r"\oplus"),
        ("⊗", r"\otimes"),
        ("∪", r"\cup"),
        ("∩", r"\cap"),
        ("∧", r"\wedge"),
        ("∨", r"\vee"),
        ("−", "-"),
        // Relations
        ("≤", r"\leq"),
        ("≥", r"\geq"),
        ("≠", r"\neq"),
        ("≈", r"\approx"),
        ("≡", r"\equiv"),
        ("∼", r"\sim"),
        ("≃", r"\simeq"),
        ("≅", r"\cong"),
        ("∝", r"\propto"),
        ("≪", r"\ll"),
        ("≫", r"\gg"),
        ("∈", r"\in"),
        ("∉", r"\notin"),
        ("∋", r"\ni"),
        ("⊂", r"\subset"),
        ("⊃", r"\supset"),
        ("⊆", r"\subseteq"),
        ("⊇", r"\supseteq"),
        ("⊥", r"\perp"),
        ("∣", r"\mid"),
        ("∥", r"\parallel"),
        // Arrows
        ("→", r"\to"),
        ("←", r"\leftarrow"),
        ("↔", r"\leftrightarrow"),
        ("⇒", r"\Rightarrow"),
        ("⇐", r"\Leftarrow"),
        ("⇔", r"\Leftrightarrow"),
        ("↦", r"\mapsto"),
        // Logic and misc
        ("∀", r"\forall"),
        ("∃", r"\exists"),
        ("¬", r"\neg"),
        ("∅", r"\emptyset"),
        ("∞", r"\infty"),
        ("∂", r"\partial"),
        ("∇", r"\nabla"),
        ("√", r"\surd"),
        ("…", r"\ldots"),
        ("⋯", r"\cdots"),
        ("⋮", r"\vdots"),
        ("⋱", r"\ddots"),
        ("′", "'"),
        ("″", "''"),
        ("⟨", r"\langle"),
        ("⟩", r"\rangle"),
        ("⌊", r"\lfloor"),
        ("⌋", r"\rfloor"),
        ("⌈", r"\lceil"),
        ("⌉", r"\rceil"),
        ("‖", r"\|"),
        ("{", r"\{"),
        ("}", r"\}"),
        // Invisible operators
        ("\u{2061}", ""),
        ("\u{2062}", ""),
        ("\u{2063}", ""),
    ])
});

/// LaTeX for an operator glyph; unknown glyphs pass through verbatim.
pub fn operator_to_latex(glyph: &str) -> &str {
    OPERATORS.get(glyph).copied().unwrap_or(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_operators() {
        assert_eq!(operator_to_latex("∑"), r"\sum");
        assert_eq!(operator_to_latex("≤"), r"\leq");
        assert_eq!(operator_to_latex("\u{2062}"), "");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(operator_to_latex("+"), "+");
        assert_eq!(operator_to_latex("("), "(");
        assert_eq!(operator_to_latex("custom"), "custom");
    }
}
