//! Labelled state graphs that refinement runs on.

use std::collections::{BTreeMap, BTreeSet};

use kripke_model::{ModelError, PointedModel, RelationId, WorldId};

use crate::partition::{Partition, Refinement};

/// States with valuations and a single transition relation, stored as a
/// predecessor map.
///
/// The state key is generic so that worlds of two different models can live
/// in one system without renumbering.
#[derive(Debug, Clone)]
pub struct TransitionSystem<K> {
    valuations: BTreeMap<K, BTreeSet<String>>,
    predecessors: BTreeMap<K, BTreeSet<K>>,
}

impl<K: Ord> Default for TransitionSystem<K> {
    fn default() -> Self {
        Self {
            valuations: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }
}

impl TransitionSystem<WorldId> {
    /// The worlds of `model` and the edges of `relation`.
    pub fn from_model(model: &PointedModel, relation: RelationId) -> Result<Self, ModelError> {
        let mut system = Self::default();
        system.add_model(model, relation, |world| world)?;
        Ok(system)
    }
}

impl<K: Ord + Clone> TransitionSystem<K> {
    pub fn add_state<I, S>(&mut self, key: K, valuation: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valuations
            .insert(key, valuation.into_iter().map(Into::into).collect());
    }

    pub fn add_transition(&mut self, from: K, to: K) {
        self.predecessors.entry(to).or_default().insert(from);
    }

    /// Copy the worlds of `model` and the edges of `relation`, keyed by `key`.
    pub fn add_model(
        &mut self,
        model: &PointedModel,
        relation: RelationId,
        key: impl Fn(WorldId) -> K,
    ) -> Result<(), ModelError> {
        let relation = model.relation(relation)?;
        for world in model.worlds() {
            self.add_state(key(world.id()), world.atoms().iter().cloned());
        }
        for (from, to) in relation.links() {
            self.add_transition(key(from), key(to));
        }
        Ok(())
    }

    pub fn state_count(&self) -> usize {
        self.valuations.len()
    }

    /// States with a transition into some member of `block`.
    pub fn predecessors_of(&self, block: &BTreeSet<K>) -> BTreeSet<K> {
        block
            .iter()
            .filter_map(|state| self.predecessors.get(state))
            .flatten()
            .cloned()
            .collect()
    }

    /// States grouped by equal valuation, ordered by their smallest member.
    pub fn initial_partition(&self) -> Partition<K> {
        let mut blocks: Vec<BTreeSet<K>> = Vec::new();
        let mut by_valuation: BTreeMap<&BTreeSet<String>, usize> = BTreeMap::new();
        for (state, valuation) in &self.valuations {
            let index = *by_valuation.entry(valuation).or_insert_with(|| {
                blocks.push(BTreeSet::new());
                blocks.len() - 1
            });
            blocks[index].insert(state.clone());
        }
        Partition::new(blocks)
    }

    /// Refine the valuation partition until no block splits any other.
    pub fn refine(&self) -> Refinement<K> {
        Refinement::run(self)
    }
}
