//! Proof-tree growth.

use std::collections::BTreeSet;

use kripke_formula::Formula;
use kripke_model::{AccessibilityRelation, ModelError, PointedModel, RelationId, World, WorldId};
use tracing::{debug, trace};

use crate::arena::{FormulaArena, FormulaId, FormulaKind};
use crate::config::TableauConfig;
use crate::error::{Result, TableauError};
use crate::rules::next_expansion;
use crate::tree::{Branch, Literal, NodeId, OpenBranch, PathEntry, ProcessingStatus, TableauNode};

const ROOT_WORLD: WorldId = WorldId::new(0);

/// A fully grown proof tree for one seed formula.
#[derive(Debug)]
pub struct Tableau {
    seed: Formula,
    arena: FormulaArena,
    nodes: Vec<TableauNode>,
    open: Vec<OpenBranch>,
    closed: usize,
    relations: BTreeSet<RelationId>,
}

/// What happened when a node was appended to its branch.
enum Absorbed {
    Closed,
    Continue,
}

impl Tableau {
    /// Grow the tableau for `seed` at world 0 until every branch is closed or
    /// saturated.
    ///
    /// # Errors
    ///
    /// [`TableauError::SearchAborted`] when the tree outgrows the configured
    /// node ceiling.
    pub fn build(seed: &Formula, config: &TableauConfig) -> Result<Self> {
        let mut arena = FormulaArena::default();
        let root_formula = arena.lower(seed);
        let mut relations = seed.relations();
        relations.insert(RelationId::DEFAULT);

        let mut tableau = Self {
            seed: seed.clone(),
            arena,
            nodes: Vec::new(),
            open: Vec::new(),
            closed: 0,
            relations,
        };

        let root = tableau.push_node(root_formula, ROOT_WORLD, config)?;
        let mut initial = Branch::new(ROOT_WORLD);
        initial.path.push(PathEntry {
            node: root,
            formula: root_formula,
            world: ROOT_WORLD,
            status: ProcessingStatus::Unprocessed,
        });

        let mut pending = vec![initial];
        while let Some(branch) = pending.pop() {
            tableau.grow(branch, &mut pending, config)?;
        }

        debug!(
            seed = %tableau.seed,
            nodes = tableau.nodes.len(),
            open = tableau.open.len(),
            closed = tableau.closed,
            "tableau complete"
        );
        Ok(tableau)
    }

    /// Seed with the negation of `formula`. The result has a model exactly
    /// when `formula` is not valid.
    pub fn for_validity(formula: &Formula, config: &TableauConfig) -> Result<Self> {
        Self::build(&Formula::not(formula.clone()), config)
    }

    /// Extend one branch until it closes, saturates or splits. Split branches
    /// go back on the work stack with the left child on top.
    fn grow(
        &mut self,
        mut branch: Branch,
        pending: &mut Vec<Branch>,
        config: &TableauConfig,
    ) -> Result<()> {
        loop {
            if let Absorbed::Closed = self.absorb_last(&mut branch) {
                self.closed += 1;
                return Ok(());
            }

            if branch.fresh_world().is_none() {
                return Err(TableauError::WorldLabelsExhausted);
            }
            let Some((rule, expansion)) = next_expansion(&mut self.arena, &branch) else {
                debug!(
                    worlds = branch.worlds.len(),
                    literals = branch.literals.len(),
                    "branch open"
                );
                self.open.push(branch.into_open());
                return Ok(());
            };
            trace!(rule, target = expansion.target, "applying rule");

            if let Some(status) = expansion.status {
                branch.path[expansion.target].status = status;
            }
            if let Some(world) = expansion.new_world {
                branch.worlds.insert(world);
            }
            if let Some(edge) = expansion.new_edge {
                branch.edges.push(edge);
            }

            let parent = branch
                .path
                .last()
                .map(|entry| entry.node)
                .unwrap_or(NodeId(0));
            let mut children = Vec::with_capacity(expansion.children.len());
            for (formula, world) in expansion.children {
                let node = self.push_node(formula, world, config)?;
                self.nodes[parent.0].children.push(node);
                children.push(PathEntry {
                    node,
                    formula,
                    world,
                    status: ProcessingStatus::Unprocessed,
                });
            }

            match children.as_slice() {
                [only] => branch.path.push(*only),
                _ => {
                    for entry in children.into_iter().rev() {
                        let mut sibling = branch.clone();
                        sibling.path.push(entry);
                        pending.push(sibling);
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Record the newest entry of the branch if it is a literal.
    fn absorb_last(&self, branch: &mut Branch) -> Absorbed {
        let Some(entry) = branch.path.last().copied() else {
            return Absorbed::Continue;
        };
        let (atom, positive) = match self.arena.get(entry.formula) {
            FormulaKind::Constant(false) => return self.close(entry, "falsum"),
            FormulaKind::Atom(atom) => (atom.clone(), true),
            FormulaKind::Not(sub) => match self.arena.get(*sub) {
                FormulaKind::Constant(true) => return self.close(entry, "negated verum"),
                FormulaKind::Atom(atom) => (atom.clone(), false),
                _ => return Absorbed::Continue,
            },
            _ => return Absorbed::Continue,
        };
        let literal = Literal {
            atom,
            world: entry.world,
            positive,
        };
        if branch.record_literal(literal) {
            return self.close(entry, "complementary literals");
        }
        Absorbed::Continue
    }

    fn close(&self, entry: PathEntry, reason: &str) -> Absorbed {
        debug!(
            node = entry.node.0,
            world = %entry.world,
            formula = %self.arena.to_formula(entry.formula),
            reason,
            "branch closed"
        );
        Absorbed::Closed
    }

    fn push_node(
        &mut self,
        formula: FormulaId,
        world: WorldId,
        config: &TableauConfig,
    ) -> Result<NodeId> {
        if let Some(limit) = config.max_nodes
            && self.nodes.len() >= limit
        {
            return Err(TableauError::SearchAborted {
                nodes: self.nodes.len(),
                limit,
            });
        }
        self.nodes.push(TableauNode {
            formula,
            world,
            children: Vec::new(),
        });
        Ok(NodeId(self.nodes.len() - 1))
    }

    pub fn seed(&self) -> &Formula {
        &self.seed
    }

    /// `true` when at least one branch stayed open.
    pub fn has_model(&self) -> bool {
        !self.open.is_empty()
    }

    /// Open branches in the order they were completed, leftmost first.
    pub fn open_branches(&self) -> &[OpenBranch] {
        &self.open
    }

    pub fn closed_branches(&self) -> usize {
        self.closed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&TableauNode> {
        self.nodes.get(id.0)
    }

    /// The formula stored at `id`, rebuilt as an owned tree.
    pub fn node_formula(&self, id: NodeId) -> Option<Formula> {
        self.node(id).map(|node| self.arena.to_formula(node.formula))
    }

    /// Build a model from the first open branch.
    ///
    /// Each world label becomes a world whose valuation is the set of
    /// positive literals recorded for it. Every relation that occurs in the
    /// seed, plus the default relation, is present; world 0 is selected.
    /// Returns `Ok(None)` when every branch closed.
    pub fn construct_model(&self) -> std::result::Result<Option<PointedModel>, ModelError> {
        let Some(branch) = self.open.first() else {
            return Ok(None);
        };

        let mut model = PointedModel::new();
        for &id in &branch.worlds {
            model.add_world(World::new(id).with_atoms(branch.true_atoms(id)))?;
        }
        for &relation in &self.relations {
            model.add_relation(AccessibilityRelation::new(relation))?;
        }
        for edge in &branch.edges {
            model.add_edge(edge.relation, edge.from, edge.to)?;
        }
        model.set_selected_world(ROOT_WORLD)?;
        Ok(Some(model))
    }

    /// Indented text rendering of the proof tree, one node per line.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            out.push_str(&format!(
                "{:indent$}{} [world: {}]\n",
                "",
                self.arena.to_formula(node.formula),
                node.world,
                indent = depth * 4
            ));
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }
}

/// Search for a model of `formula`.
pub fn find_model(formula: &Formula, config: &TableauConfig) -> Result<Option<PointedModel>> {
    Ok(Tableau::build(formula, config)?.construct_model()?)
}

/// Search for a model falsifying `formula` at its selected world.
///
/// `Ok(None)` means the formula is valid in K.
pub fn find_countermodel(formula: &Formula, config: &TableauConfig) -> Result<Option<PointedModel>> {
    Ok(Tableau::for_validity(formula, config)?.construct_model()?)
}
