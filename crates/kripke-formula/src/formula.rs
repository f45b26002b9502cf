use std::collections::BTreeSet;

use kripke_model::RelationId;

/// A propositional modal formula.
///
/// Each node owns its children. Modal operators name the relation they
/// quantify over; the parser always produces [`RelationId::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    Possibly {
        relation: RelationId,
        sub: Box<Formula>,
    },
    Necessarily {
        relation: RelationId,
        sub: Box<Formula>,
    },
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    /// Conjunction over an ordered collection.
    AndAll(Vec<Formula>),
    /// Disjunction over an ordered collection.
    OrAll(Vec<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    // Named after the connective, not `std::ops::Not`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(sub: Formula) -> Self {
        Self::Not(Box::new(sub))
    }

    pub fn possibly(sub: Formula) -> Self {
        Self::possibly_in(RelationId::DEFAULT, sub)
    }

    pub fn possibly_in(relation: RelationId, sub: Formula) -> Self {
        Self::Possibly {
            relation,
            sub: Box::new(sub),
        }
    }

    pub fn necessarily(sub: Formula) -> Self {
        Self::necessarily_in(RelationId::DEFAULT, sub)
    }

    pub fn necessarily_in(relation: RelationId, sub: Formula) -> Self {
        Self::Necessarily {
            relation,
            sub: Box::new(sub),
        }
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Self::Implies(Box::new(left), Box::new(right))
    }

    pub fn and_all(subs: impl IntoIterator<Item = Formula>) -> Self {
        Self::AndAll(subs.into_iter().collect())
    }

    pub fn or_all(subs: impl IntoIterator<Item = Formula>) -> Self {
        Self::OrAll(subs.into_iter().collect())
    }

    /// An atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Self::Atom(_) => true,
            Self::Not(sub) => matches!(**sub, Self::Atom(_)),
            _ => false,
        }
    }

    /// Immediate sub-formulas, left to right.
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Self::Atom(_) => Vec::new(),
            Self::Not(sub) | Self::Possibly { sub, .. } | Self::Necessarily { sub, .. } => {
                vec![&**sub]
            }
            Self::And(left, right) | Self::Or(left, right) | Self::Implies(left, right) => {
                vec![&**left, &**right]
            }
            Self::AndAll(subs) | Self::OrAll(subs) => subs.iter().collect(),
        }
    }

    /// Atom names occurring anywhere in the formula.
    pub fn atoms(&self) -> BTreeSet<&str> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms<'a>(&'a self, atoms: &mut BTreeSet<&'a str>) {
        if let Self::Atom(name) = self {
            atoms.insert(name.as_str());
        }
        for child in self.children() {
            child.collect_atoms(atoms);
        }
    }

    /// Relations referenced by modal operators.
    pub fn relations(&self) -> BTreeSet<RelationId> {
        let mut relations = BTreeSet::new();
        self.collect_relations(&mut relations);
        relations
    }

    fn collect_relations(&self, relations: &mut BTreeSet<RelationId>) {
        if let Self::Possibly { relation, .. } | Self::Necessarily { relation, .. } = self {
            relations.insert(*relation);
        }
        for child in self.children() {
            child.collect_relations(relations);
        }
    }

    /// Maximum nesting of modal operators.
    pub fn modal_depth(&self) -> usize {
        let below = self
            .children()
            .into_iter()
            .map(Formula::modal_depth)
            .max()
            .unwrap_or(0);
        match self {
            Self::Possibly { .. } | Self::Necessarily { .. } => below + 1,
            _ => below,
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Formula::size)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Formula {
        Formula::atom("p")
    }

    fn q() -> Formula {
        Formula::atom("q")
    }

    #[test]
    fn literals() {
        assert!(p().is_literal());
        assert!(Formula::not(p()).is_literal());
        assert!(!Formula::not(Formula::not(p())).is_literal());
        assert!(!Formula::possibly(p()).is_literal());
    }

    #[test]
    fn structural_queries() {
        let formula = Formula::implies(
            Formula::necessarily(Formula::possibly(p())),
            Formula::or_all([q(), Formula::possibly_in(RelationId::new(2), p())]),
        );
        assert_eq!(formula.atoms().into_iter().collect::<Vec<_>>(), vec!["p", "q"]);
        assert_eq!(
            formula.relations().into_iter().collect::<Vec<_>>(),
            vec![RelationId::DEFAULT, RelationId::new(2)]
        );
        assert_eq!(formula.modal_depth(), 2);
        assert_eq!(formula.size(), 8);
    }

    #[test]
    fn serializes_with_kind_tags() {
        let json = serde_json::to_value(Formula::and(p(), Formula::not(q()))).unwrap();
        assert_eq!(json["kind"], "And");
        assert_eq!(json["value"][0]["kind"], "Atom");
        assert_eq!(json["value"][1]["value"]["value"], "q");
    }
}
