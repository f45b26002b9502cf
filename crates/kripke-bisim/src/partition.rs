use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::system::TransitionSystem;

/// Disjoint, non-empty blocks covering every state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Partition<K> {
    blocks: Vec<BTreeSet<K>>,
}

impl<K: Ord> Partition<K> {
    pub(crate) fn new(blocks: Vec<BTreeSet<K>>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[BTreeSet<K>] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Index of the block containing `state`.
    pub fn block_of(&self, state: &K) -> Option<usize> {
        self.blocks.iter().position(|block| block.contains(state))
    }

    pub fn same_block(&self, a: &K, b: &K) -> bool {
        self.block_of(a)
            .is_some_and(|block| self.blocks[block].contains(b))
    }
}

impl<K: Ord + Clone> Partition<K> {
    /// Replace every block that `splitter` cuts with its part inside
    /// `splitter` followed by its part outside.
    fn split_by(&mut self, splitter: &BTreeSet<K>) -> bool {
        let mut changed = false;
        let mut blocks = Vec::with_capacity(self.blocks.len());
        for block in std::mem::take(&mut self.blocks) {
            let (inside, outside): (BTreeSet<K>, BTreeSet<K>) =
                block.into_iter().partition(|state| splitter.contains(state));
            changed |= !inside.is_empty() && !outside.is_empty();
            blocks.extend([inside, outside].into_iter().filter(|part| !part.is_empty()));
        }
        self.blocks = blocks;
        changed
    }
}

/// The coarsest stable partition and the block count after each pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refinement<K> {
    pub partition: Partition<K>,
    /// Entry 0 is the valuation partition; the last two entries are equal.
    pub block_counts: Vec<usize>,
}

impl<K: Ord + Clone> Refinement<K> {
    pub(crate) fn run(system: &TransitionSystem<K>) -> Self {
        let mut partition = system.initial_partition();
        let mut block_counts = vec![partition.len()];
        debug!(
            states = system.state_count(),
            blocks = partition.len(),
            "initial partition"
        );

        loop {
            let before = partition.len();
            // Splitters are the blocks as they were when the pass started.
            // Each is a union of current blocks, so splitting by its
            // predecessors keeps bisimilar states together.
            for splitter in partition.blocks.clone() {
                let predecessors = system.predecessors_of(&splitter);
                partition.split_by(&predecessors);
            }
            block_counts.push(partition.len());
            debug!(
                pass = block_counts.len() - 1,
                blocks = partition.len(),
                "refinement pass"
            );
            if partition.len() == before {
                break;
            }
        }

        Self {
            partition,
            block_counts,
        }
    }
}
