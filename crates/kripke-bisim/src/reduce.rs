//! Quotients of a model by its coarsest bisimulation.

use kripke_model::{AccessibilityRelation, ModelError, PointedModel, World, WorldId};
use tracing::debug;

use crate::config::RefinementConfig;
use crate::partition::Refinement;
use crate::system::TransitionSystem;

/// Group the worlds of `model` into blocks of bisimilar worlds with respect
/// to the configured relation.
pub fn coarsest_partition(
    model: &PointedModel,
    config: &RefinementConfig,
) -> Result<Refinement<WorldId>, ModelError> {
    Ok(TransitionSystem::from_model(model, config.relation)?.refine())
}

/// [`reduce_model_with`] on the default relation.
pub fn reduce_model(model: &PointedModel) -> Result<PointedModel, ModelError> {
    reduce_model_with(model, &RefinementConfig::default())
}

/// Collapse every block of bisimilar worlds into a single world.
///
/// World `i` of the result stands for block `i` and carries the valuation all
/// its members share. It is selected if the selected world of `model` is in
/// the block. An edge links two blocks whenever some member of the first
/// reaches some member of the second. Only the refined relation is carried
/// over.
pub fn reduce_model_with(
    model: &PointedModel,
    config: &RefinementConfig,
) -> Result<PointedModel, ModelError> {
    let refinement = coarsest_partition(model, config)?;
    let partition = &refinement.partition;
    let relation = model.relation(config.relation)?;

    let mut reduced = PointedModel::new();
    for (index, block) in partition.blocks().iter().enumerate() {
        let atoms = block
            .first()
            .and_then(|&member| model.world(member))
            .map(|member| member.atoms().clone())
            .unwrap_or_default();
        reduced.add_world(World::new(block_world(index)).with_atoms(atoms))?;
    }
    reduced.add_relation(AccessibilityRelation::new(relation.id()).with_name(relation.name()))?;

    for (from, to) in relation.links() {
        if let (Some(from), Some(to)) = (partition.block_of(&from), partition.block_of(&to)) {
            reduced.add_edge(relation.id(), block_world(from), block_world(to))?;
        }
    }

    if let Some(block) = model
        .selected_world()
        .and_then(|selected| partition.block_of(&selected))
    {
        reduced.set_selected_world(block_world(block))?;
    }

    debug!(
        worlds = model.world_count(),
        reduced = reduced.world_count(),
        "model reduced"
    );
    Ok(reduced)
}

fn block_world(index: usize) -> WorldId {
    WorldId::new(index as u32)
}
