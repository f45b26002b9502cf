use std::collections::BTreeSet;

use serde::Serialize;

use crate::ids::WorldId;

/// A point of a Kripke model together with its valuation.
///
/// Atom membership is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct World {
    id: WorldId,
    name: String,
    atoms: BTreeSet<String>,
}

impl World {
    /// Create a world with an empty valuation and the default name `w{id}`.
    pub fn new(id: WorldId) -> Self {
        Self {
            id,
            name: format!("w{id}"),
            atoms: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_atoms<I, S>(mut self, atoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_atoms(atoms);
        self
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn has_atom(&self, atom: &str) -> bool {
        self.atoms.contains(atom)
    }

    /// Returns `true` if the atom was not already true here.
    pub fn add_atom(&mut self, atom: impl Into<String>) -> bool {
        self.atoms.insert(atom.into())
    }

    /// Returns `true` if the atom was true here.
    pub fn remove_atom(&mut self, atom: &str) -> bool {
        self.atoms.remove(atom)
    }

    /// Replace the whole valuation.
    pub fn set_atoms<I, S>(&mut self, atoms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.atoms = atoms.into_iter().map(Into::into).collect();
    }

    pub fn atoms(&self) -> &BTreeSet<String> {
        &self.atoms
    }

    /// Valuation equality, independent of insertion order.
    pub fn same_valuation(&self, other: &World) -> bool {
        self.atoms == other.atoms
    }
}
