use std::collections::BTreeSet;

use kripke_model::{ModelError, PointedModel, WorldId};

use crate::formula::Formula;

impl Formula {
    /// Truth of the formula at `world`.
    ///
    /// Fails if `world`, or any world or relation the evaluation has to
    /// visit, is not part of `model`.
    pub fn is_satisfied(&self, world: WorldId, model: &PointedModel) -> Result<bool, ModelError> {
        match self {
            Self::Atom(name) => model
                .world(world)
                .map(|w| w.has_atom(name))
                .ok_or(ModelError::UnknownWorld(world)),
            Self::Not(sub) => Ok(!sub.is_satisfied(world, model)?),
            Self::Possibly { relation, sub } => {
                for next in model.accessible_worlds(*relation, world)? {
                    if sub.is_satisfied(next, model)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Necessarily { relation, sub } => {
                for next in model.accessible_worlds(*relation, world)? {
                    if !sub.is_satisfied(next, model)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::And(left, right) => {
                Ok(left.is_satisfied(world, model)? && right.is_satisfied(world, model)?)
            }
            Self::Or(left, right) => {
                Ok(left.is_satisfied(world, model)? || right.is_satisfied(world, model)?)
            }
            Self::Implies(left, right) => {
                Ok(!left.is_satisfied(world, model)? || right.is_satisfied(world, model)?)
            }
            Self::AndAll(subs) => {
                for sub in subs {
                    if !sub.is_satisfied(world, model)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::OrAll(subs) => {
                for sub in subs {
                    if sub.is_satisfied(world, model)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Truth at the model's designated world.
    pub fn holds_at_selected(&self, model: &PointedModel) -> Result<bool, ModelError> {
        let world = model.selected_world().ok_or(ModelError::NoSelectedWorld)?;
        self.is_satisfied(world, model)
    }

    /// Every world of the model at which the formula holds.
    pub fn extension(&self, model: &PointedModel) -> Result<BTreeSet<WorldId>, ModelError> {
        let mut worlds = BTreeSet::new();
        for world in model.world_ids() {
            if self.is_satisfied(world, model)? {
                worlds.insert(world);
            }
        }
        Ok(worlds)
    }
}
