#![deny(unsafe_code)]

use std::fmt;

/// Identifier of a world, unique within one model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct WorldId(u32);

impl WorldId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id following this one, or `None` past `u32::MAX`.
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl From<u32> for WorldId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of an accessibility relation, referenced by modal operators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RelationId(u32);

impl RelationId {
    /// Relation used by `poss`/`nec` when no other relation is named.
    pub const DEFAULT: Self = Self(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_default(self) -> bool {
        self.0 == Self::DEFAULT.0
    }
}

impl Default for RelationId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup key for a relation: either its index or its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKey<'a> {
    Id(RelationId),
    Name(&'a str),
}

impl From<RelationId> for RelationKey<'_> {
    fn from(id: RelationId) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for RelationKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for RelationKey<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name.as_str())
    }
}

impl fmt::Display for RelationKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}
