use thiserror::Error;

use crate::ids::WorldId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("world {0} is not part of the model")]
    UnknownWorld(WorldId),
    #[error("world {0} already exists in the model")]
    DuplicateWorld(WorldId),
    #[error("relation '{0}' is not part of the model")]
    UnknownRelation(String),
    #[error("relation '{0}' already exists in the model")]
    DuplicateRelation(String),
    #[error("no world id is left after {0}")]
    WorldIdsExhausted(WorldId),
    #[error("model has no selected world")]
    NoSelectedWorld,
}

pub type Result<T> = std::result::Result<T, ModelError>;
