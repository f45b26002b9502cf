//! Expansion rules, tried in a fixed order.
//!
//! Each rule scans the branch path from the root downwards and fires on the
//! first entry it matches. The engine applies the first rule that fires
//! anywhere on the branch.

use kripke_model::{Edge, WorldId};

use crate::arena::{FormulaArena, FormulaId, FormulaKind};
use crate::tree::{Branch, PathEntry, ProcessingStatus};

/// The effect of one rule application on the current branch.
#[derive(Debug)]
pub(crate) struct Expansion {
    /// Index into the branch path of the entry the rule fired on.
    pub(crate) target: usize,
    /// New marker for the target. `None` leaves it untouched.
    pub(crate) status: Option<ProcessingStatus>,
    pub(crate) new_world: Option<WorldId>,
    pub(crate) new_edge: Option<Edge>,
    /// One entry extends the branch, two split it.
    pub(crate) children: Vec<(FormulaId, WorldId)>,
}

impl Expansion {
    fn extend(target: usize, status: Option<ProcessingStatus>, child: (FormulaId, WorldId)) -> Self {
        Self {
            target,
            status,
            new_world: None,
            new_edge: None,
            children: vec![child],
        }
    }

    fn split(target: usize, world: WorldId, left: FormulaId, right: FormulaId) -> Self {
        Self {
            target,
            status: Some(ProcessingStatus::FullyProcessed),
            new_world: None,
            new_edge: None,
            children: vec![(left, world), (right, world)],
        }
    }
}

type RuleFn = fn(&mut FormulaArena, &Branch, usize) -> Option<Expansion>;

pub(crate) struct Rule {
    pub(crate) name: &'static str,
    apply: RuleFn,
}

pub(crate) const RULES: [Rule; 14] = [
    Rule { name: "conjunction-left", apply: conjunction_left },
    Rule { name: "conjunction-right", apply: conjunction_right },
    Rule { name: "double-negation", apply: double_negation },
    Rule { name: "negated-possibility", apply: negated_possibility },
    Rule { name: "negated-necessity", apply: negated_necessity },
    Rule { name: "possibility", apply: possibility },
    Rule { name: "necessity", apply: necessity },
    Rule { name: "negated-disjunction-left", apply: negated_disjunction_left },
    Rule { name: "negated-disjunction-right", apply: negated_disjunction_right },
    Rule { name: "negated-implication-left", apply: negated_implication_left },
    Rule { name: "negated-implication-right", apply: negated_implication_right },
    Rule { name: "implication", apply: implication },
    Rule { name: "disjunction", apply: disjunction },
    Rule { name: "negated-conjunction", apply: negated_conjunction },
];

/// Find the first rule that fires anywhere on the branch.
pub(crate) fn next_expansion(
    arena: &mut FormulaArena,
    branch: &Branch,
) -> Option<(&'static str, Expansion)> {
    RULES.iter().find_map(|rule| {
        (0..branch.path.len())
            .find_map(|index| (rule.apply)(arena, branch, index))
            .map(|expansion| (rule.name, expansion))
    })
}

fn entry_with(branch: &Branch, index: usize, status: ProcessingStatus) -> Option<&PathEntry> {
    let entry = &branch.path[index];
    (entry.status == status).then_some(entry)
}

/// The operand of a negation.
fn negation_operand(arena: &FormulaArena, id: FormulaId) -> Option<FormulaId> {
    match *arena.get(id) {
        FormulaKind::Not(sub) => Some(sub),
        _ => None,
    }
}

fn conjunction_left(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let FormulaKind::And(left, _) = *arena.get(entry.formula) else {
        return None;
    };
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::PartiallyProcessed),
        (left, entry.world),
    ))
}

fn conjunction_right(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::PartiallyProcessed)?;
    let FormulaKind::And(_, right) = *arena.get(entry.formula) else {
        return None;
    };
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::FullyProcessed),
        (right, entry.world),
    ))
}

fn double_negation(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let sub = negation_operand(arena, inner)?;
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::FullyProcessed),
        (sub, entry.world),
    ))
}

fn negated_possibility(
    arena: &mut FormulaArena,
    branch: &Branch,
    index: usize,
) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::Possibly { relation, sub } = *arena.get(inner) else {
        return None;
    };
    let negated_sub = arena.negate(sub);
    let dual = arena.alloc(FormulaKind::Necessarily {
        relation,
        sub: negated_sub,
    });
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::FullyProcessed),
        (dual, entry.world),
    ))
}

fn negated_necessity(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::Necessarily { relation, sub } = *arena.get(inner) else {
        return None;
    };
    let negated_sub = arena.negate(sub);
    let dual = arena.alloc(FormulaKind::Possibly {
        relation,
        sub: negated_sub,
    });
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::FullyProcessed),
        (dual, entry.world),
    ))
}

fn possibility(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let FormulaKind::Possibly { relation, sub } = *arena.get(entry.formula) else {
        return None;
    };
    let fresh = branch.fresh_world()?;
    Some(Expansion {
        target: index,
        status: Some(ProcessingStatus::FullyProcessed),
        new_world: Some(fresh),
        new_edge: Some(Edge {
            relation,
            from: entry.world,
            to: fresh,
        }),
        children: vec![(sub, fresh)],
    })
}

/// Fires once per existing edge whose target lacks the sub-formula. The
/// entry stays unprocessed so that edges added later are picked up too.
fn necessity(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = &branch.path[index];
    let FormulaKind::Necessarily { relation, sub } = *arena.get(entry.formula) else {
        return None;
    };
    branch
        .edges
        .iter()
        .filter(|edge| edge.relation == relation && edge.from == entry.world)
        .find(|edge| !branch.contains(sub, edge.to))
        .map(|edge| Expansion::extend(index, None, (sub, edge.to)))
}

fn negated_disjunction_left(
    arena: &mut FormulaArena,
    branch: &Branch,
    index: usize,
) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::Or(left, _) = *arena.get(inner) else {
        return None;
    };
    let negated_left = arena.negate(left);
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::PartiallyProcessed),
        (negated_left, entry.world),
    ))
}

fn negated_disjunction_right(
    arena: &mut FormulaArena,
    branch: &Branch,
    index: usize,
) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::PartiallyProcessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::Or(_, right) = *arena.get(inner) else {
        return None;
    };
    let negated_right = arena.negate(right);
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::FullyProcessed),
        (negated_right, entry.world),
    ))
}

fn negated_implication_left(
    arena: &mut FormulaArena,
    branch: &Branch,
    index: usize,
) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::Implies(antecedent, _) = *arena.get(inner) else {
        return None;
    };
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::PartiallyProcessed),
        (antecedent, entry.world),
    ))
}

fn negated_implication_right(
    arena: &mut FormulaArena,
    branch: &Branch,
    index: usize,
) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::PartiallyProcessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::Implies(_, consequent) = *arena.get(inner) else {
        return None;
    };
    let negated_consequent = arena.negate(consequent);
    Some(Expansion::extend(
        index,
        Some(ProcessingStatus::FullyProcessed),
        (negated_consequent, entry.world),
    ))
}

fn implication(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let FormulaKind::Implies(antecedent, consequent) = *arena.get(entry.formula) else {
        return None;
    };
    let negated_antecedent = arena.negate(antecedent);
    Some(Expansion::split(
        index,
        entry.world,
        negated_antecedent,
        consequent,
    ))
}

fn disjunction(arena: &mut FormulaArena, branch: &Branch, index: usize) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let FormulaKind::Or(left, right) = *arena.get(entry.formula) else {
        return None;
    };
    Some(Expansion::split(index, entry.world, left, right))
}

fn negated_conjunction(
    arena: &mut FormulaArena,
    branch: &Branch,
    index: usize,
) -> Option<Expansion> {
    let entry = entry_with(branch, index, ProcessingStatus::Unprocessed)?;
    let inner = negation_operand(arena, entry.formula)?;
    let FormulaKind::And(left, right) = *arena.get(inner) else {
        return None;
    };
    let negated_left = arena.negate(left);
    let negated_right = arena.negate(right);
    Some(Expansion::split(index, entry.world, negated_left, negated_right))
}

#[cfg(test)]
mod tests {
    use kripke_formula::Formula;

    use super::*;
    use crate::tree::NodeId;

    fn branch_for(arena: &mut FormulaArena, formula: &Formula) -> Branch {
        let root = arena.lower(formula);
        let mut branch = Branch::new(WorldId::new(0));
        branch.path.push(PathEntry {
            node: NodeId(0),
            formula: root,
            world: WorldId::new(0),
            status: ProcessingStatus::Unprocessed,
        });
        branch
    }

    #[test]
    fn conjunction_is_taken_apart_in_two_steps() {
        let mut arena = FormulaArena::default();
        let branch = branch_for(&mut arena, &Formula::and(Formula::atom("p"), Formula::atom("q")));
        let (name, expansion) = next_expansion(&mut arena, &branch).expect("rule fires");
        assert_eq!(name, "conjunction-left");
        assert_eq!(expansion.status, Some(ProcessingStatus::PartiallyProcessed));
        assert_eq!(expansion.children.len(), 1);
    }

    #[test]
    fn possibility_introduces_a_fresh_world_and_edge() {
        let mut arena = FormulaArena::default();
        let branch = branch_for(&mut arena, &Formula::possibly(Formula::atom("p")));
        let (name, expansion) = next_expansion(&mut arena, &branch).expect("rule fires");
        assert_eq!(name, "possibility");
        assert_eq!(expansion.new_world, Some(WorldId::new(1)));
        let edge = expansion.new_edge.expect("edge");
        assert_eq!((edge.from, edge.to), (WorldId::new(0), WorldId::new(1)));
        assert_eq!(expansion.children[0].1, WorldId::new(1));
    }

    #[test]
    fn no_fresh_world_past_the_last_label() {
        let mut arena = FormulaArena::default();
        let mut branch = branch_for(&mut arena, &Formula::possibly(Formula::atom("p")));
        branch.worlds.insert(WorldId::new(u32::MAX));
        assert_eq!(branch.fresh_world(), None);
        assert!(next_expansion(&mut arena, &branch).is_none());
    }

    #[test]
    fn necessity_without_edges_does_not_fire() {
        let mut arena = FormulaArena::default();
        let branch = branch_for(&mut arena, &Formula::necessarily(Formula::atom("p")));
        assert!(next_expansion(&mut arena, &branch).is_none());
    }

    #[test]
    fn necessity_only_follows_its_own_relation() {
        let mut arena = FormulaArena::default();
        let formula = Formula::necessarily_in(
            kripke_model::RelationId::new(2),
            Formula::atom("p"),
        );
        let mut branch = branch_for(&mut arena, &formula);
        branch.worlds.insert(WorldId::new(1));
        branch.edges.push(Edge {
            relation: kripke_model::RelationId::DEFAULT,
            from: WorldId::new(0),
            to: WorldId::new(1),
        });
        assert!(next_expansion(&mut arena, &branch).is_none());
    }

    #[test]
    fn disjunction_splits() {
        let mut arena = FormulaArena::default();
        let branch = branch_for(&mut arena, &Formula::or(Formula::atom("p"), Formula::atom("q")));
        let (name, expansion) = next_expansion(&mut arena, &branch).expect("rule fires");
        assert_eq!(name, "disjunction");
        assert_eq!(expansion.children.len(), 2);
        assert_eq!(expansion.status, Some(ProcessingStatus::FullyProcessed));
    }
}
