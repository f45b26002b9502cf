//! The largest bisimulation between two models.

use std::collections::BTreeSet;

use kripke_model::{ModelError, PointedModel, WorldId};
use serde::Serialize;
use tracing::debug;

use crate::config::RefinementConfig;
use crate::system::TransitionSystem;

/// Worlds of the disjoint union, tagged with the model they come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Side {
    Left(WorldId),
    Right(WorldId),
}

/// Pairs `(left, right)` of bisimilar worlds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bisimulation {
    pub pairs: BTreeSet<(WorldId, WorldId)>,
}

impl Bisimulation {
    pub fn contains(&self, left: WorldId, right: WorldId) -> bool {
        self.pairs.contains(&(left, right))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether the selected worlds of the two models are related.
    pub fn relates_selected(
        &self,
        left: &PointedModel,
        right: &PointedModel,
    ) -> Result<bool, ModelError> {
        let left = left.selected_world().ok_or(ModelError::NoSelectedWorld)?;
        let right = right.selected_world().ok_or(ModelError::NoSelectedWorld)?;
        Ok(self.contains(left, right))
    }
}

/// Refine the disjoint union of both models and relate every left world to
/// every right world that ends up in the same block.
pub fn construct_bisimulation(
    left: &PointedModel,
    right: &PointedModel,
    config: &RefinementConfig,
) -> Result<Bisimulation, ModelError> {
    let mut system = TransitionSystem::default();
    system.add_model(left, config.relation, Side::Left)?;
    system.add_model(right, config.relation, Side::Right)?;
    let refinement = system.refine();

    let mut pairs = BTreeSet::new();
    for block in refinement.partition.blocks() {
        let (lefts, rights): (Vec<Side>, Vec<Side>) = block
            .iter()
            .copied()
            .partition(|side| matches!(side, Side::Left(_)));
        for left in &lefts {
            for right in &rights {
                if let (Side::Left(left), Side::Right(right)) = (left, right) {
                    pairs.insert((*left, *right));
                }
            }
        }
    }

    debug!(
        blocks = refinement.partition.len(),
        pairs = pairs.len(),
        "bisimulation constructed"
    );
    Ok(Bisimulation { pairs })
}

/// Whether the selected worlds of the two models are bisimilar.
pub fn are_bisimilar(
    left: &PointedModel,
    right: &PointedModel,
    config: &RefinementConfig,
) -> Result<bool, ModelError> {
    construct_bisimulation(left, right, config)?.relates_selected(left, right)
}
