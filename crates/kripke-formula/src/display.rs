//! Display forms of a formula. All of them depend on the tree alone.

use std::fmt;

use kripke_model::RelationId;

use crate::formula::Formula;
use crate::parser::RESERVED_TOKENS;

impl Formula {
    /// Symbolic form used for display: `¬`, `◇`, `□`, `∧`, `∨`, `→`, `⋀{..}`, `⋁{..}`.
    ///
    /// Modal operators over a relation other than the default one carry the
    /// relation index in brackets, e.g. `◇[2]p`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// LaTeX source for math rendering.
    pub fn to_latex(&self) -> String {
        let mut out = String::new();
        write_latex(self, &mut out);
        out
    }

    /// The formula in the textual input grammar, such that parsing the result
    /// yields the same formula.
    ///
    /// `None` for formulas the grammar cannot express: set conjunctions and
    /// disjunctions, modal operators over a non-default relation, and atoms
    /// that are empty, padded with whitespace or contain a reserved token.
    pub fn to_grammar(&self) -> Option<String> {
        let mut out = String::new();
        write_grammar(self, &mut out).then_some(out)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name) => f.write_str(name),
            Self::Not(sub) => write!(f, "¬{sub}"),
            Self::Possibly { relation, sub } => {
                write!(f, "◇{}{sub}", RelationSuffix(*relation))
            }
            Self::Necessarily { relation, sub } => {
                write!(f, "□{}{sub}", RelationSuffix(*relation))
            }
            Self::And(left, right) => write!(f, "({left} ∧ {right})"),
            Self::Or(left, right) => write!(f, "({left} ∨ {right})"),
            Self::Implies(left, right) => write!(f, "({left} → {right})"),
            Self::AndAll(subs) => write!(f, "⋀{{{}}}", SubList(subs)),
            Self::OrAll(subs) => write!(f, "⋁{{{}}}", SubList(subs)),
        }
    }
}

struct RelationSuffix(RelationId);

impl fmt::Display for RelationSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_default() {
            Ok(())
        } else {
            write!(f, "[{}]", self.0)
        }
    }
}

struct SubList<'a>(&'a [Formula]);

impl fmt::Display for SubList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, sub) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{sub}")?;
        }
        Ok(())
    }
}

fn write_latex(formula: &Formula, out: &mut String) {
    match formula {
        Formula::Atom(name) => out.push_str(name),
        Formula::Not(sub) => {
            out.push_str("\\neg ");
            write_latex(sub, out);
        }
        Formula::Possibly { relation, sub } => {
            out.push_str("\\Diamond");
            write_latex_relation(*relation, out);
            write_latex(sub, out);
        }
        Formula::Necessarily { relation, sub } => {
            out.push_str("\\Box");
            write_latex_relation(*relation, out);
            write_latex(sub, out);
        }
        Formula::And(left, right) => write_latex_binary(left, "\\land", right, out),
        Formula::Or(left, right) => write_latex_binary(left, "\\lor", right, out),
        Formula::Implies(left, right) => write_latex_binary(left, "\\rightarrow", right, out),
        Formula::AndAll(subs) => write_latex_set("\\bigwedge", subs, out),
        Formula::OrAll(subs) => write_latex_set("\\bigvee", subs, out),
    }
}

fn write_latex_relation(relation: RelationId, out: &mut String) {
    if !relation.is_default() {
        out.push_str(&format!("_{{{relation}}}"));
    }
    out.push(' ');
}

fn write_latex_binary(left: &Formula, connective: &str, right: &Formula, out: &mut String) {
    out.push('(');
    write_latex(left, out);
    out.push(' ');
    out.push_str(connective);
    out.push(' ');
    write_latex(right, out);
    out.push(')');
}

fn write_latex_set(operator: &str, subs: &[Formula], out: &mut String) {
    out.push_str(operator);
    out.push_str(" \\{");
    for (index, sub) in subs.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_latex(sub, out);
    }
    out.push_str("\\}");
}

/// Returns `false` as soon as a construct has no textual form.
fn write_grammar(formula: &Formula, out: &mut String) -> bool {
    match formula {
        Formula::Atom(name) => {
            out.push_str(name);
            is_grammar_atom(name)
        }
        Formula::Not(sub) => {
            out.push_str("not ");
            write_grammar(sub, out)
        }
        Formula::Possibly { relation, sub } if relation.is_default() => {
            out.push_str("poss ");
            write_grammar(sub, out)
        }
        Formula::Necessarily { relation, sub } if relation.is_default() => {
            out.push_str("nec ");
            write_grammar(sub, out)
        }
        Formula::And(left, right) => write_grammar_binary(left, "and", right, out),
        Formula::Or(left, right) => write_grammar_binary(left, "or", right, out),
        Formula::Implies(left, right) => write_grammar_binary(left, "then", right, out),
        Formula::Possibly { .. }
        | Formula::Necessarily { .. }
        | Formula::AndAll(_)
        | Formula::OrAll(_) => false,
    }
}

/// Whether `name` reads back as this very atom.
fn is_grammar_atom(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !RESERVED_TOKENS.iter().any(|token| name.contains(token))
}

fn write_grammar_binary(left: &Formula, keyword: &str, right: &Formula, out: &mut String) -> bool {
    out.push('(');
    if !write_grammar(left, out) {
        return false;
    }
    out.push(' ');
    out.push_str(keyword);
    out.push(' ');
    if !write_grammar(right, out) {
        return false;
    }
    out.push(')');
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latex_matches_display_structure() {
        let formula = Formula::implies(
            Formula::necessarily(Formula::atom("p")),
            Formula::not(Formula::possibly_in(RelationId::new(2), Formula::atom("q"))),
        );
        assert_eq!(
            formula.to_latex(),
            "(\\Box p \\rightarrow \\neg \\Diamond_{2} q)"
        );
        assert_eq!(formula.serialize(), "(□p → ¬◇[2]q)");
    }

    #[test]
    fn grammar_form_is_absent_for_set_formulas() {
        let formula = Formula::and(Formula::atom("p"), Formula::and_all([Formula::atom("q")]));
        assert_eq!(formula.to_grammar(), None);
        assert_eq!(
            Formula::possibly_in(RelationId::new(3), Formula::atom("p")).to_grammar(),
            None
        );
    }

    #[test]
    fn grammar_form_is_absent_for_atoms_that_do_not_read_back() {
        for name in ["p and q", "poss q", "a,b", "(p)", " p", "p ", ""] {
            assert_eq!(Formula::atom(name).to_grammar(), None, "atom {name:?}");
        }
        assert_eq!(Formula::not(Formula::atom("poss q")).to_grammar(), None);
        assert_eq!(
            Formula::and(Formula::atom("p"), Formula::atom("q or r")).to_grammar(),
            None
        );
        assert_eq!(
            Formula::not(Formula::atom("knotty")).to_grammar().as_deref(),
            Some("not knotty")
        );
    }
}
