//! Proof-tree nodes and per-branch bookkeeping.

use std::collections::BTreeSet;

use kripke_model::{Edge, WorldId};

use crate::arena::FormulaId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// A formula placed at a world label. Children are sibling branches.
#[derive(Debug, Clone)]
pub struct TableauNode {
    pub(crate) formula: FormulaId,
    pub(crate) world: WorldId,
    pub(crate) children: Vec<NodeId>,
}

impl TableauNode {
    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// How far a node's obligations have been discharged on one branch.
///
/// Necessity nodes never leave `Unprocessed`; they react to every new edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessingStatus {
    Unprocessed,
    /// The first of two sequential expansions has been applied.
    PartiallyProcessed,
    FullyProcessed,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PathEntry {
    pub(crate) node: NodeId,
    pub(crate) formula: FormulaId,
    pub(crate) world: WorldId,
    pub(crate) status: ProcessingStatus,
}

/// An atom or negated atom recorded at a world label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub atom: String,
    pub world: WorldId,
    pub positive: bool,
}

impl Literal {
    fn complement(&self) -> Self {
        Self {
            atom: self.atom.clone(),
            world: self.world,
            positive: !self.positive,
        }
    }
}

/// Everything accumulated from the root down to the node being expanded.
///
/// Each child of a branching node receives its own copy, so sibling
/// subtrees never observe each other's markers, worlds or edges.
#[derive(Debug, Clone)]
pub(crate) struct Branch {
    pub(crate) path: Vec<PathEntry>,
    pub(crate) worlds: BTreeSet<WorldId>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) literals: Vec<Literal>,
    literal_index: BTreeSet<Literal>,
}

impl Branch {
    pub(crate) fn new(root_world: WorldId) -> Self {
        Self {
            path: Vec::new(),
            worlds: BTreeSet::from([root_world]),
            edges: Vec::new(),
            literals: Vec::new(),
            literal_index: BTreeSet::new(),
        }
    }

    /// Record a literal. Returns `true` if its complement is already recorded
    /// at the same world, i.e. the branch closes.
    pub(crate) fn record_literal(&mut self, literal: Literal) -> bool {
        let closes = self.literal_index.contains(&literal.complement());
        if self.literal_index.insert(literal.clone()) {
            self.literals.push(literal);
        }
        closes
    }

    /// `max(world labels) + 1`, `None` once the label range is used up.
    pub(crate) fn fresh_world(&self) -> Option<WorldId> {
        match self.worlds.last() {
            None => Some(WorldId::new(0)),
            Some(world) => world.checked_next(),
        }
    }

    /// Whether `formula` already sits at `world` somewhere on this branch.
    pub(crate) fn contains(&self, formula: FormulaId, world: WorldId) -> bool {
        self.path
            .iter()
            .any(|entry| entry.formula == formula && entry.world == world)
    }

    pub(crate) fn into_open(self) -> OpenBranch {
        OpenBranch {
            literals: self.literals,
            worlds: self.worlds,
            edges: self.edges,
        }
    }
}

/// A saturated branch that did not close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBranch {
    pub literals: Vec<Literal>,
    pub worlds: BTreeSet<WorldId>,
    pub edges: Vec<Edge>,
}

impl OpenBranch {
    /// Atoms recorded as true at `world`.
    pub fn true_atoms(&self, world: WorldId) -> impl Iterator<Item = &str> + '_ {
        self.literals
            .iter()
            .filter(move |literal| literal.positive && literal.world == world)
            .map(|literal| literal.atom.as_str())
    }
}
