//! Entity table and per-tag component index.
//!
//! The [`World`] owns every entity and its components. Alongside the entity
//! table it maintains one entity set per component tag, so that
//! [`World::entities_with`] is a set intersection over the declared tags
//! rather than a scan over all entities.
//!
//! The world is single-writer by design: only the tick loop mutates it, so it
//! needs no interior locking.

use std::collections::{HashMap, HashSet};

use crate::component::Component;
use crate::entity::{EntityAllocator, EntityId};
use crate::error::EcsError;

/// Entity-component storage with per-tag indexing.
pub struct World<C: Component> {
    allocator: EntityAllocator,
    entities: HashMap<EntityId, HashMap<C::Tag, C>>,
    tag_index: HashMap<C::Tag, HashSet<EntityId>>,
}

impl<C: Component> World<C> {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: HashMap::new(),
            tag_index: HashMap::new(),
        }
    }

    /// Creates a new entity with a fresh id and no components.
    pub fn spawn(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        self.entities.insert(id, HashMap::new());
        id
    }

    /// Attaches a component to an entity and registers the entity under the
    /// component's tag.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity does not exist and
    /// [`EcsError::DuplicateComponent`] if the entity already carries a
    /// component of the same kind. Both indicate a broken entity recipe and
    /// surface at setup time.
    pub fn attach(&mut self, id: EntityId, component: C) -> Result<(), EcsError> {
        let tag = component.tag();
        let components = self
            .entities
            .get_mut(&id)
            .ok_or(EcsError::UnknownEntity(id))?;
        if components.contains_key(&tag) {
            return Err(EcsError::DuplicateComponent {
                entity: id,
                tag: format!("{tag:?}"),
            });
        }
        components.insert(tag, component);
        self.tag_index.entry(tag).or_default().insert(id);
        Ok(())
    }

    /// Returns the component of the given kind, or `None`.
    ///
    /// Components are frequently optional — a building has no `Movement` — so
    /// absence is not an error.
    #[must_use]
    pub fn component(&self, id: EntityId, tag: C::Tag) -> Option<&C> {
        self.entities.get(&id)?.get(&tag)
    }

    /// Mutable variant of [`World::component`].
    #[must_use]
    pub fn component_mut(&mut self, id: EntityId, tag: C::Tag) -> Option<&mut C> {
        self.entities.get_mut(&id)?.get_mut(&tag)
    }

    /// Iterates over all components of an entity, in unspecified order.
    pub fn components(&self, id: EntityId) -> impl Iterator<Item = &C> {
        self.entities.get(&id).into_iter().flat_map(HashMap::values)
    }

    /// Returns the entities carrying all of the given component tags.
    ///
    /// This is the intersection of the per-tag index sets, walked from the
    /// smallest set outward. The result order is unspecified.
    #[must_use]
    pub fn entities_with(&self, tags: &[C::Tag]) -> Vec<EntityId> {
        let mut sets: Vec<&HashSet<EntityId>> = Vec::with_capacity(tags.len());
        for tag in tags {
            match self.tag_index.get(tag) {
                Some(set) => sets.push(set),
                None => return Vec::new(),
            }
        }
        sets.sort_by_key(|set| set.len());
        let Some((first, rest)) = sets.split_first() else {
            return Vec::new();
        };
        first
            .iter()
            .copied()
            .filter(|id| rest.iter().all(|set| set.contains(id)))
            .collect()
    }

    /// Removes an entity and all its components from every index.
    ///
    /// Returns whether the entity existed. Systems holding an id across ticks
    /// must re-check liveness via lookup rather than assume validity.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(components) = self.entities.remove(&id) else {
            return false;
        };
        for tag in components.keys() {
            if let Some(set) = self.tag_index.get_mut(tag) {
                set.remove(&id);
            }
        }
        true
    }

    /// Returns `true` if the entity is in the entity table.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns all live entity ids, in unspecified order.
    #[must_use]
    pub fn entities(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<C: Component> Default for World<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentTag;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Tag {
        Pos,
        Vel,
        Hp,
    }
    impl ComponentTag for Tag {}

    #[derive(Debug)]
    enum Comp {
        Pos(f32, f32),
        Vel(f32),
        Hp(u32),
    }
    impl Component for Comp {
        type Tag = Tag;
        fn tag(&self) -> Tag {
            match self {
                Comp::Pos(..) => Tag::Pos,
                Comp::Vel(..) => Tag::Vel,
                Comp::Hp(..) => Tag::Hp,
            }
        }
    }

    #[test]
    fn test_attach_indexes_entity_under_tag() {
        let mut world: World<Comp> = World::new();
        let e = world.spawn();
        world.attach(e, Comp::Pos(1.0, 2.0)).unwrap();
        assert_eq!(world.entities_with(&[Tag::Pos]), vec![e]);
        assert!(world.entities_with(&[Tag::Vel]).is_empty());
    }

    #[test]
    fn test_attach_duplicate_tag_fails() {
        let mut world: World<Comp> = World::new();
        let e = world.spawn();
        world.attach(e, Comp::Hp(1)).unwrap();
        let err = world.attach(e, Comp::Hp(2)).unwrap_err();
        assert!(matches!(err, EcsError::DuplicateComponent { .. }));
    }

    #[test]
    fn test_attach_unknown_entity_fails() {
        let mut world: World<Comp> = World::new();
        let err = world.attach(EntityId::from_raw(99), Comp::Hp(1)).unwrap_err();
        assert!(matches!(err, EcsError::UnknownEntity(_)));
    }

    #[test]
    fn test_component_lookup_absent_is_none() {
        let mut world: World<Comp> = World::new();
        let e = world.spawn();
        world.attach(e, Comp::Pos(0.0, 0.0)).unwrap();
        assert!(world.component(e, Tag::Pos).is_some());
        assert!(world.component(e, Tag::Vel).is_none());
    }

    #[test]
    fn test_intersection_query_equals_set_intersection() {
        let mut world: World<Comp> = World::new();
        let a = world.spawn();
        let b = world.spawn();
        let c = world.spawn();
        world.attach(a, Comp::Pos(0.0, 0.0)).unwrap();
        world.attach(a, Comp::Vel(1.0)).unwrap();
        world.attach(b, Comp::Pos(0.0, 0.0)).unwrap();
        world.attach(c, Comp::Vel(1.0)).unwrap();

        let both: HashSet<_> = world.entities_with(&[Tag::Pos, Tag::Vel]).into_iter().collect();
        let pos: HashSet<_> = world.entities_with(&[Tag::Pos]).into_iter().collect();
        let vel: HashSet<_> = world.entities_with(&[Tag::Vel]).into_iter().collect();
        let expected: HashSet<_> = pos.intersection(&vel).copied().collect();
        assert_eq!(both, expected);
        assert_eq!(both.len(), 1);
        assert!(both.contains(&a));
    }

    #[test]
    fn test_despawn_removes_from_every_index() {
        let mut world: World<Comp> = World::new();
        let e = world.spawn();
        world.attach(e, Comp::Pos(0.0, 0.0)).unwrap();
        world.attach(e, Comp::Hp(10)).unwrap();

        assert!(world.despawn(e));
        assert!(!world.contains(e));
        assert!(world.entities_with(&[Tag::Pos]).is_empty());
        assert!(world.entities_with(&[Tag::Hp]).is_empty());
        // Despawning again reports the entity as gone.
        assert!(!world.despawn(e));
    }

    #[test]
    fn test_empty_tag_list_matches_nothing() {
        let mut world: World<Comp> = World::new();
        world.spawn();
        assert!(world.entities_with(&[]).is_empty());
    }
}
