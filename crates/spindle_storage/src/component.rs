//! Component storage with one slot per concrete type.
//!
//! Components are pure data. Each entity holds at most one instance of a
//! given Rust type; the stable per-type identifier is the type's [`TypeId`].
//! Re-adding a component of a type the entity already has overwrites the
//! previous value, and removing an absent component is a silent no-op.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use spindle_foundation::EntityId;

/// The components attached to a single entity.
#[derive(Default)]
pub struct ComponentSet {
    /// One slot per concrete component type.
    slots: HashMap<TypeId, Box<dyn Any>>,
}

impl ComponentSet {
    /// Creates an empty component set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a component, overwriting any existing value of that type.
    pub fn insert<T: Any>(&mut self, component: T) {
        self.slots.insert(TypeId::of::<T>(), Box::new(component));
    }

    /// Gets a component by type.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Gets a component by type, mutably.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.slots
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    /// Removes and returns a component by type.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.slots
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Checks if a component of the given type is present.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of components in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the set holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Slot values are type-erased; only the count is printable.
        f.debug_struct("ComponentSet")
            .field("len", &self.len())
            .finish()
    }
}

/// Component storage for all entities.
#[derive(Default)]
pub struct ComponentStore {
    /// Per-entity component sets.
    by_entity: HashMap<EntityId, ComponentSet>,
}

impl ComponentStore {
    /// Creates an empty component store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a component for an entity, overwriting any existing value
    /// of that type.
    pub fn insert<T: Any>(&mut self, entity: EntityId, component: T) {
        self.by_entity.entry(entity).or_default().insert(component);
    }

    /// Gets a component of an entity by type.
    #[must_use]
    pub fn get<T: Any>(&self, entity: EntityId) -> Option<&T> {
        self.by_entity.get(&entity).and_then(ComponentSet::get)
    }

    /// Gets a component of an entity by type, mutably.
    pub fn get_mut<T: Any>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.by_entity.get_mut(&entity).and_then(ComponentSet::get_mut)
    }

    /// Removes and returns a component of an entity by type.
    pub fn remove<T: Any>(&mut self, entity: EntityId) -> Option<T> {
        self.by_entity.get_mut(&entity).and_then(ComponentSet::remove)
    }

    /// Checks if an entity has a component of the given type.
    #[must_use]
    pub fn contains<T: Any>(&self, entity: EntityId) -> bool {
        self.by_entity
            .get(&entity)
            .is_some_and(ComponentSet::contains::<T>)
    }

    /// Drops every component attached to an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.by_entity.remove(&entity);
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.by_entity.iter().map(|(e, set)| (e, set.len())))
            .finish()
    }
}
