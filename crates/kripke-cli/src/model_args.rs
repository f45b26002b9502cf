//! Models described on the command line.
//!
//! Worlds are declared as `NAME` or `NAME=atom,atom`, edges of the default
//! relation as `FROM:TO` using world names.

use std::collections::BTreeMap;
use std::str::FromStr;

use kripke_model::{AccessibilityRelation, ModelError, PointedModel, RelationId, World, WorldId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelSpecError {
    #[error("world specification '{0}' has no name")]
    EmptyWorldName(String),
    #[error("edge '{0}' is not of the form FROM:TO")]
    InvalidEdge(String),
    #[error("world '{0}' is declared twice")]
    DuplicateWorldName(String),
    #[error("unknown world '{0}'")]
    UnknownWorldName(String),
    #[error("a model needs at least one world")]
    NoWorlds,
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSpec {
    pub name: String,
    pub atoms: Vec<String>,
}

impl FromStr for WorldSpec {
    type Err = ModelSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, atoms) = match s.split_once('=') {
            Some((name, atoms)) => (
                name,
                atoms
                    .split(',')
                    .map(str::trim)
                    .filter(|atom| !atom.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            None => (s, Vec::new()),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelSpecError::EmptyWorldName(s.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            atoms,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
}

impl FromStr for EdgeSpec {
    type Err = ModelSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => Ok(Self {
                from: from.trim().to_string(),
                to: to.trim().to_string(),
            }),
            _ => Err(ModelSpecError::InvalidEdge(s.to_string())),
        }
    }
}

/// Build a model with one default relation.
///
/// Worlds are numbered in declaration order. The world named by `at` is
/// selected, or the first declared world when `at` is `None`.
pub fn build_model(
    worlds: &[WorldSpec],
    edges: &[EdgeSpec],
    at: Option<&str>,
) -> Result<PointedModel, ModelSpecError> {
    if worlds.is_empty() {
        return Err(ModelSpecError::NoWorlds);
    }
    let mut model = PointedModel::new();
    let mut ids: BTreeMap<&str, WorldId> = BTreeMap::new();

    for (index, spec) in (0u32..).zip(worlds) {
        let id = WorldId::new(index);
        if ids.insert(spec.name.as_str(), id).is_some() {
            return Err(ModelSpecError::DuplicateWorldName(spec.name.clone()));
        }
        model.add_world(
            World::new(id)
                .with_name(spec.name.as_str())
                .with_atoms(spec.atoms.iter().map(String::as_str)),
        )?;
    }

    let lookup = |name: &str| {
        ids.get(name)
            .copied()
            .ok_or_else(|| ModelSpecError::UnknownWorldName(name.to_string()))
    };

    model.add_relation(AccessibilityRelation::new(RelationId::DEFAULT))?;
    for edge in edges {
        model.add_edge(RelationId::DEFAULT, lookup(&edge.from)?, lookup(&edge.to)?)?;
    }

    let selected = match at {
        Some(name) => lookup(name)?,
        None => WorldId::new(0),
    };
    model.set_selected_world(selected)?;
    Ok(model)
}
