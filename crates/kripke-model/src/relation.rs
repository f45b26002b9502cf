use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ids::{RelationId, WorldId};

/// A named binary relation between worlds, stored as adjacency sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityRelation {
    id: RelationId,
    name: String,
    links: BTreeMap<WorldId, BTreeSet<WorldId>>,
}

impl AccessibilityRelation {
    /// Create an empty relation named `R{id}`.
    pub fn new(id: RelationId) -> Self {
        Self {
            id,
            name: format!("R{id}"),
            links: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> RelationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns `true` if the link is new.
    pub(crate) fn add_link(&mut self, from: WorldId, to: WorldId) -> bool {
        self.links.entry(from).or_default().insert(to)
    }

    /// Returns `true` if the link existed.
    pub(crate) fn remove_link(&mut self, from: WorldId, to: WorldId) -> bool {
        let Some(targets) = self.links.get_mut(&from) else {
            return false;
        };
        let removed = targets.remove(&to);
        if targets.is_empty() {
            self.links.remove(&from);
        }
        removed
    }

    /// Drop every link into or out of `world`.
    pub(crate) fn remove_world(&mut self, world: WorldId) {
        self.links.remove(&world);
        self.links.retain(|_, targets| {
            targets.remove(&world);
            !targets.is_empty()
        });
    }

    pub fn is_accessible(&self, from: WorldId, to: WorldId) -> bool {
        self.links
            .get(&from)
            .is_some_and(|targets| targets.contains(&to))
    }

    /// Worlds reachable from `from` in one step, in id order.
    pub fn accessible_worlds(&self, from: WorldId) -> impl Iterator<Item = WorldId> + '_ {
        self.links.get(&from).into_iter().flatten().copied()
    }

    /// Worlds with a link into `to`, in id order.
    pub fn linking_worlds(&self, to: WorldId) -> impl Iterator<Item = WorldId> + '_ {
        self.links
            .iter()
            .filter(move |(_, targets)| targets.contains(&to))
            .map(|(from, _)| *from)
    }

    /// All links as `(from, to)` pairs, ordered by source then target.
    pub fn links(&self) -> impl Iterator<Item = (WorldId, WorldId)> + '_ {
        self.links
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |to| (*from, *to)))
    }

    pub fn link_count(&self) -> usize {
        self.links.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(id: u32) -> WorldId {
        WorldId::new(id)
    }

    #[test]
    fn default_name_uses_id() {
        let relation = AccessibilityRelation::new(RelationId::new(2));
        assert_eq!(relation.name(), "R2");
    }

    #[test]
    fn links_are_directed() {
        let mut relation = AccessibilityRelation::new(RelationId::DEFAULT);
        assert!(relation.add_link(w(0), w(1)));
        assert!(!relation.add_link(w(0), w(1)));
        assert!(relation.is_accessible(w(0), w(1)));
        assert!(!relation.is_accessible(w(1), w(0)));
        assert_eq!(relation.linking_worlds(w(1)).collect::<Vec<_>>(), vec![w(0)]);
    }

    #[test]
    fn remove_world_prunes_both_directions() {
        let mut relation = AccessibilityRelation::new(RelationId::DEFAULT);
        relation.add_link(w(0), w(1));
        relation.add_link(w(1), w(2));
        relation.add_link(w(2), w(1));
        relation.add_link(w(0), w(2));
        relation.remove_world(w(1));
        assert_eq!(relation.links().collect::<Vec<_>>(), vec![(w(0), w(2))]);
        assert_eq!(relation.link_count(), 1);
    }

    #[test]
    fn remove_missing_link_is_false() {
        let mut relation = AccessibilityRelation::new(RelationId::DEFAULT);
        assert!(!relation.remove_link(w(0), w(1)));
        relation.add_link(w(0), w(1));
        assert!(relation.remove_link(w(0), w(1)));
        assert_eq!(relation.accessible_worlds(w(0)).count(), 0);
    }
}
