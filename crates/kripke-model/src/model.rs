use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use tracing::trace;

use crate::error::{ModelError, Result};
use crate::ids::{RelationId, RelationKey, WorldId};
use crate::observer::{ModelObserver, ObserverId, ObserverRegistry};
use crate::relation::AccessibilityRelation;
use crate::world::World;

/// A single link of a named relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub relation: RelationId,
    pub from: WorldId,
    pub to: WorldId,
}

/// Worlds, relations and an optional designated world.
///
/// The model exclusively owns its worlds and relations. Every mutating method
/// either fails without side effects or commits its change and then notifies
/// all attached observers before returning. Unknown worlds and relations are
/// reported as [`ModelError`] by queries and mutations alike, except for the
/// `Option`-returning presence lookups [`PointedModel::world`] and
/// [`PointedModel::world_by_name`].
#[derive(Debug, Default)]
pub struct PointedModel {
    worlds: BTreeMap<WorldId, World>,
    relations: Vec<AccessibilityRelation>,
    selected: Option<WorldId>,
    observers: ObserverRegistry,
}

impl Clone for PointedModel {
    /// Clones worlds, relations and selection. Observers stay with the original.
    fn clone(&self) -> Self {
        Self {
            worlds: self.worlds.clone(),
            relations: self.relations.clone(),
            selected: self.selected,
            observers: ObserverRegistry::default(),
        }
    }
}

impl PointedModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// Register an observer. Attaching the same `Rc` twice returns the first id.
    pub fn attach_observer(&mut self, observer: Rc<dyn ModelObserver>) -> ObserverId {
        self.observers.attach(observer)
    }

    /// Returns `true` if the observer was attached.
    pub fn detach_observer(&mut self, id: ObserverId) -> bool {
        self.observers.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify_observers(&self) {
        for observer in self.observers.snapshot() {
            observer.model_changed(self);
        }
    }

    // ---------------------------------------------------------------------
    // Worlds
    // ---------------------------------------------------------------------

    pub fn add_world(&mut self, world: World) -> Result<WorldId> {
        let id = world.id();
        if self.worlds.contains_key(&id) {
            return Err(ModelError::DuplicateWorld(id));
        }
        self.worlds.insert(id, world);
        trace!(world = %id, "world added");
        self.notify_observers();
        Ok(id)
    }

    /// Add an empty world with the next free id.
    ///
    /// Fails with [`ModelError::WorldIdsExhausted`] once a world holds
    /// `u32::MAX`; the model is left untouched.
    pub fn create_world(&mut self) -> Result<WorldId> {
        let id = self.next_world_id()?;
        self.add_world(World::new(id))
    }

    /// The smallest id greater than every id in use.
    pub fn next_world_id(&self) -> Result<WorldId> {
        match self.worlds.keys().next_back() {
            None => Ok(WorldId::new(0)),
            Some(&last) => last
                .checked_next()
                .ok_or(ModelError::WorldIdsExhausted(last)),
        }
    }

    /// Remove a world together with every edge that touches it.
    pub fn remove_world(&mut self, id: WorldId) -> Result<World> {
        let world = self.worlds.remove(&id).ok_or(ModelError::UnknownWorld(id))?;
        for relation in &mut self.relations {
            relation.remove_world(id);
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        trace!(world = %id, "world removed");
        self.notify_observers();
        Ok(world)
    }

    /// Presence lookup: `None` when no world has this id. Use
    /// [`PointedModel::contains_world`] for a plain test; mutations on an
    /// unknown id fail with [`ModelError::UnknownWorld`] instead.
    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.get(&id)
    }

    /// First world carrying `name`, `None` when there is none.
    pub fn world_by_name(&self, name: &str) -> Option<&World> {
        self.worlds.values().find(|world| world.name() == name)
    }

    pub fn contains_world(&self, id: WorldId) -> bool {
        self.worlds.contains_key(&id)
    }

    /// Worlds in id order.
    pub fn worlds(&self) -> impl Iterator<Item = &World> + '_ {
        self.worlds.values()
    }

    pub fn world_ids(&self) -> impl Iterator<Item = WorldId> + '_ {
        self.worlds.keys().copied()
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    pub fn set_world_name(&mut self, id: WorldId, name: impl Into<String>) -> Result<()> {
        self.world_mut(id)?.set_name(name);
        self.notify_observers();
        Ok(())
    }

    pub fn set_valuation<I, S>(&mut self, id: WorldId, atoms: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.world_mut(id)?.set_atoms(atoms);
        trace!(world = %id, "valuation replaced");
        self.notify_observers();
        Ok(())
    }

    pub fn add_atom(&mut self, id: WorldId, atom: impl Into<String>) -> Result<()> {
        self.world_mut(id)?.add_atom(atom);
        self.notify_observers();
        Ok(())
    }

    pub fn remove_atom(&mut self, id: WorldId, atom: &str) -> Result<()> {
        self.world_mut(id)?.remove_atom(atom);
        self.notify_observers();
        Ok(())
    }

    fn world_mut(&mut self, id: WorldId) -> Result<&mut World> {
        self.worlds.get_mut(&id).ok_or(ModelError::UnknownWorld(id))
    }

    fn require_world(&self, id: WorldId) -> Result<()> {
        if self.worlds.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::UnknownWorld(id))
        }
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    pub fn selected_world(&self) -> Option<WorldId> {
        self.selected
    }

    /// Designate a member world. A non-member fails and leaves the selection as is.
    pub fn set_selected_world(&mut self, id: WorldId) -> Result<()> {
        self.require_world(id)?;
        self.selected = Some(id);
        self.notify_observers();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.notify_observers();
    }

    // ---------------------------------------------------------------------
    // Relations
    // ---------------------------------------------------------------------

    /// Add a relation. Ids and names must both be unused, and any links the
    /// relation already carries must stay within the model's worlds.
    pub fn add_relation(&mut self, relation: AccessibilityRelation) -> Result<RelationId> {
        if self
            .relations
            .iter()
            .any(|existing| existing.id() == relation.id() || existing.name() == relation.name())
        {
            return Err(ModelError::DuplicateRelation(relation.name().to_string()));
        }
        for (from, to) in relation.links() {
            self.require_world(from)?;
            self.require_world(to)?;
        }
        let id = relation.id();
        trace!(relation = %relation.name(), "relation added");
        self.relations.push(relation);
        self.notify_observers();
        Ok(id)
    }

    pub fn remove_relation<'a>(
        &mut self,
        key: impl Into<RelationKey<'a>>,
    ) -> Result<AccessibilityRelation> {
        let index = self.relation_index(key.into())?;
        let relation = self.relations.remove(index);
        trace!(relation = %relation.name(), "relation removed");
        self.notify_observers();
        Ok(relation)
    }

    pub fn set_relation_name<'a>(
        &mut self,
        key: impl Into<RelationKey<'a>>,
        name: impl Into<String>,
    ) -> Result<()> {
        let index = self.relation_index(key.into())?;
        let name = name.into();
        if self
            .relations
            .iter()
            .enumerate()
            .any(|(other, relation)| other != index && relation.name() == name)
        {
            return Err(ModelError::DuplicateRelation(name));
        }
        self.relations[index].set_name(name);
        self.notify_observers();
        Ok(())
    }

    pub fn relation<'a>(&self, key: impl Into<RelationKey<'a>>) -> Result<&AccessibilityRelation> {
        let index = self.relation_index(key.into())?;
        Ok(&self.relations[index])
    }

    /// Relations in insertion order.
    pub fn relations(&self) -> &[AccessibilityRelation] {
        &self.relations
    }

    fn relation_index(&self, key: RelationKey<'_>) -> Result<usize> {
        let found = match key {
            RelationKey::Id(id) => self.relations.iter().position(|r| r.id() == id),
            RelationKey::Name(name) => self.relations.iter().position(|r| r.name() == name),
        };
        found.ok_or_else(|| ModelError::UnknownRelation(key.to_string()))
    }

    // ---------------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------------

    /// Returns `true` if the edge is new.
    pub fn add_edge<'a>(
        &mut self,
        key: impl Into<RelationKey<'a>>,
        from: WorldId,
        to: WorldId,
    ) -> Result<bool> {
        let index = self.relation_index(key.into())?;
        self.require_world(from)?;
        self.require_world(to)?;
        let added = self.relations[index].add_link(from, to);
        trace!(relation = %self.relations[index].name(), %from, %to, added, "edge added");
        self.notify_observers();
        Ok(added)
    }

    /// Returns `true` if the edge existed.
    pub fn remove_edge<'a>(
        &mut self,
        key: impl Into<RelationKey<'a>>,
        from: WorldId,
        to: WorldId,
    ) -> Result<bool> {
        let index = self.relation_index(key.into())?;
        self.require_world(from)?;
        self.require_world(to)?;
        let removed = self.relations[index].remove_link(from, to);
        trace!(relation = %self.relations[index].name(), %from, %to, removed, "edge removed");
        self.notify_observers();
        Ok(removed)
    }

    pub fn is_accessible<'a>(
        &self,
        key: impl Into<RelationKey<'a>>,
        from: WorldId,
        to: WorldId,
    ) -> Result<bool> {
        let relation = self.relation(key)?;
        self.require_world(from)?;
        self.require_world(to)?;
        Ok(relation.is_accessible(from, to))
    }

    /// Successors of `world` under the relation, in id order.
    pub fn accessible_worlds<'a>(
        &self,
        key: impl Into<RelationKey<'a>>,
        world: WorldId,
    ) -> Result<Vec<WorldId>> {
        let relation = self.relation(key)?;
        self.require_world(world)?;
        Ok(relation.accessible_worlds(world).collect())
    }

    /// Predecessors of `world` under the relation, in id order.
    pub fn incoming_worlds<'a>(
        &self,
        key: impl Into<RelationKey<'a>>,
        world: WorldId,
    ) -> Result<Vec<WorldId>> {
        let relation = self.relation(key)?;
        self.require_world(world)?;
        Ok(relation.linking_worlds(world).collect())
    }

    /// Every edge of one relation.
    pub fn relation_edges<'a>(&self, key: impl Into<RelationKey<'a>>) -> Result<Vec<Edge>> {
        let relation = self.relation(key)?;
        Ok(relation
            .links()
            .map(|(from, to)| Edge {
                relation: relation.id(),
                from,
                to,
            })
            .collect())
    }

    /// Every edge of every relation, grouped by relation in insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        self.relations
            .iter()
            .flat_map(|relation| {
                relation.links().map(move |(from, to)| Edge {
                    relation: relation.id(),
                    from,
                    to,
                })
            })
            .collect()
    }
}
