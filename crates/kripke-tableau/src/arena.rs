//! Arena of formula nodes used during tableau growth.
//!
//! Every sub-formula occurrence of the seed, and every formula a rule derives,
//! gets its own [`FormulaId`]. The necessity rule relies on this: "already
//! added at that world" is a question about one specific occurrence, not about
//! structurally equal formulas.

use kripke_formula::Formula;
use kripke_model::RelationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct FormulaId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormulaKind {
    Atom(String),
    /// Lowered empty set conjunction (`true`) or disjunction (`false`).
    Constant(bool),
    Not(FormulaId),
    Possibly { relation: RelationId, sub: FormulaId },
    Necessarily { relation: RelationId, sub: FormulaId },
    And(FormulaId, FormulaId),
    Or(FormulaId, FormulaId),
    Implies(FormulaId, FormulaId),
}

#[derive(Debug, Default)]
pub(crate) struct FormulaArena {
    nodes: Vec<FormulaKind>,
}

impl FormulaArena {
    pub(crate) fn get(&self, id: FormulaId) -> &FormulaKind {
        &self.nodes[id.0]
    }

    pub(crate) fn alloc(&mut self, kind: FormulaKind) -> FormulaId {
        self.nodes.push(kind);
        FormulaId(self.nodes.len() - 1)
    }

    pub(crate) fn negate(&mut self, id: FormulaId) -> FormulaId {
        self.alloc(FormulaKind::Not(id))
    }

    /// Copy `formula` into the arena. Set forms become right-nested binary
    /// chains.
    pub(crate) fn lower(&mut self, formula: &Formula) -> FormulaId {
        match formula {
            Formula::Atom(name) => self.alloc(FormulaKind::Atom(name.clone())),
            Formula::Not(sub) => {
                let sub = self.lower(sub);
                self.alloc(FormulaKind::Not(sub))
            }
            Formula::Possibly { relation, sub } => {
                let sub = self.lower(sub);
                self.alloc(FormulaKind::Possibly {
                    relation: *relation,
                    sub,
                })
            }
            Formula::Necessarily { relation, sub } => {
                let sub = self.lower(sub);
                self.alloc(FormulaKind::Necessarily {
                    relation: *relation,
                    sub,
                })
            }
            Formula::And(left, right) => {
                let (left, right) = (self.lower(left), self.lower(right));
                self.alloc(FormulaKind::And(left, right))
            }
            Formula::Or(left, right) => {
                let (left, right) = (self.lower(left), self.lower(right));
                self.alloc(FormulaKind::Or(left, right))
            }
            Formula::Implies(left, right) => {
                let (left, right) = (self.lower(left), self.lower(right));
                self.alloc(FormulaKind::Implies(left, right))
            }
            Formula::AndAll(subs) => self.lower_chain(subs, true),
            Formula::OrAll(subs) => self.lower_chain(subs, false),
        }
    }

    fn lower_chain(&mut self, subs: &[Formula], conjunction: bool) -> FormulaId {
        match subs {
            [] => self.alloc(FormulaKind::Constant(conjunction)),
            [only] => self.lower(only),
            [first, rest @ ..] => {
                let left = self.lower(first);
                let right = self.lower_chain(rest, conjunction);
                self.alloc(if conjunction {
                    FormulaKind::And(left, right)
                } else {
                    FormulaKind::Or(left, right)
                })
            }
        }
    }

    /// Rebuild an owned formula for display.
    pub(crate) fn to_formula(&self, id: FormulaId) -> Formula {
        match self.get(id) {
            FormulaKind::Atom(name) => Formula::atom(name.clone()),
            FormulaKind::Constant(true) => Formula::and_all([]),
            FormulaKind::Constant(false) => Formula::or_all([]),
            FormulaKind::Not(sub) => Formula::not(self.to_formula(*sub)),
            FormulaKind::Possibly { relation, sub } => {
                Formula::possibly_in(*relation, self.to_formula(*sub))
            }
            FormulaKind::Necessarily { relation, sub } => {
                Formula::necessarily_in(*relation, self.to_formula(*sub))
            }
            FormulaKind::And(left, right) => {
                Formula::and(self.to_formula(*left), self.to_formula(*right))
            }
            FormulaKind::Or(left, right) => {
                Formula::or(self.to_formula(*left), self.to_formula(*right))
            }
            FormulaKind::Implies(left, right) => {
                Formula::implies(self.to_formula(*left), self.to_formula(*right))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrences_get_distinct_ids() {
        let mut arena = FormulaArena::default();
        let formula = Formula::and(Formula::atom("p"), Formula::atom("p"));
        let root = arena.lower(&formula);
        let FormulaKind::And(left, right) = *arena.get(root) else {
            panic!("expected a conjunction");
        };
        assert_ne!(left, right);
        assert_eq!(arena.get(left), arena.get(right));
    }

    #[test]
    fn set_forms_lower_to_chains() {
        let mut arena = FormulaArena::default();
        let formula = Formula::and_all([Formula::atom("p"), Formula::atom("q"), Formula::atom("r")]);
        let root = arena.lower(&formula);
        assert_eq!(
            arena.to_formula(root),
            Formula::and(
                Formula::atom("p"),
                Formula::and(Formula::atom("q"), Formula::atom("r"))
            )
        );
        let single = arena.lower(&Formula::or_all([Formula::atom("p")]));
        assert_eq!(arena.to_formula(single), Formula::atom("p"));
        let empty = arena.lower(&Formula::or_all([]));
        assert_eq!(arena.get(empty), &FormulaKind::Constant(false));
    }
}
