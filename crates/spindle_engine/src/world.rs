//! World orchestration: the update/dispatch cycle.
//!
//! One `update()` call is one logical tick. It promotes pending-created
//! entities, demotes pending-destroyed ones, injects the global `Tick`
//! event, then drains the event queue and routes each drained event to
//! every entity in a stable snapshot of the active set. Because lifecycle
//! buffers are flushed before any dispatch, and the queue swaps its buffer
//! at the start of the drain, structural mutation never races the
//! iteration it would corrupt.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use spindle_foundation::{EntityId, Result};
use spindle_storage::{ComponentStore, EntityLifecycle, GroupIndex, TagIndex};

use crate::behaviour::Behaviour;
use crate::entity::BehaviourSet;
use crate::event::{Event, EventKind};
use crate::queue::EventQueue;

/// Everything a behaviour may touch while handling an event.
///
/// Kept separate from the behaviour table so that dispatch can hand
/// behaviours mutable access to the world without aliasing the collection
/// being iterated.
#[derive(Default)]
pub(crate) struct WorldState {
    /// Entity lifecycle buffers and the active set.
    lifecycle: EntityLifecycle,
    /// Component data for all entities.
    components: ComponentStore,
    /// Unique string-to-entity bindings.
    tags: TagIndex,
    /// Named entity sets.
    groups: GroupIndex,
    /// Pending events.
    queue: EventQueue,
    /// Behaviour attachments requested mid-dispatch, flushed after the
    /// drain loop so the behaviour table is never mutated while iterated.
    deferred: Vec<(EntityId, Box<dyn Behaviour>)>,
}

impl WorldState {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Marks an entity pending-destroy and queues its `DestroyedEntity`
    /// event (buffered like any other submission).
    fn destroy_entity(&mut self, entity: EntityId) {
        self.lifecycle.destroy(entity);
        self.queue.submit(Event::destroyed(entity));
    }
}

/// The simulation world: entities, components, behaviours, and the event
/// queue, advanced one tick at a time by [`update`](Self::update).
#[derive(Default)]
pub struct World {
    /// Shared state handed to behaviours during dispatch.
    state: WorldState,
    /// Behaviours per entity.
    behaviours: HashMap<EntityId, BehaviourSet>,
    /// Category dispatch order, earliest first.
    ///
    /// Mutable at any time between updates and re-read at the top of every
    /// update. A category absent from this list dispatches before all
    /// listed categories; ties between absent categories follow
    /// first-attach order.
    category_order: Vec<String>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates an entity in the pending-created state and returns its id.
    ///
    /// The entity becomes active at the next [`update`](Self::update);
    /// until then it receives no events, but components and behaviours can
    /// already be attached.
    pub fn create_entity(&mut self) -> EntityId {
        self.state.lifecycle.create()
    }

    /// Marks an entity for destruction and queues a targeted
    /// `DestroyedEntity` event.
    ///
    /// The entity stays active, and keeps receiving dispatched events,
    /// through the update in which this is called; it is removed at the
    /// start of the next update. Re-destroying is a no-op.
    pub fn destroy_entity(&mut self, entity: EntityId) {
        self.state.destroy_entity(entity);
    }

    /// Checks if an entity is currently in the active set.
    #[must_use]
    pub fn is_active(&self, entity: EntityId) -> bool {
        self.state.lifecycle.is_active(entity)
    }

    /// Iterates over active entities in promotion order.
    pub fn active_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.state.lifecycle.active()
    }

    /// Returns the number of active entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lifecycle.len()
    }

    /// Returns true if no entities are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lifecycle.is_empty()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attaches a component, overwriting any existing one of the same type.
    pub fn add_component<T: Any>(&mut self, entity: EntityId, component: T) {
        self.state.components.insert(entity, component);
    }

    /// Reads a component of an entity.
    #[must_use]
    pub fn component<T: Any>(&self, entity: EntityId) -> Option<&T> {
        self.state.components.get(entity)
    }

    /// Reads a component of an entity, mutably.
    pub fn component_mut<T: Any>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.state.components.get_mut(entity)
    }

    /// Checks whether an entity has a component of the given type.
    #[must_use]
    pub fn has_component<T: Any>(&self, entity: EntityId) -> bool {
        self.state.components.contains::<T>(entity)
    }

    /// Detaches and returns a component. Absent components are a no-op.
    pub fn remove_component<T: Any>(&mut self, entity: EntityId) -> Option<T> {
        self.state.components.remove(entity)
    }

    // =========================================================================
    // Behaviours
    // =========================================================================

    /// Attaches a behaviour to an entity under the behaviour's category.
    pub fn add_behaviour(&mut self, entity: EntityId, behaviour: impl Behaviour) {
        self.behaviours
            .entry(entity)
            .or_default()
            .insert(Box::new(behaviour));
    }

    /// Detaches the first behaviour of the given concrete type from an
    /// entity. Returns whether one was removed; absent behaviours are a
    /// silent no-op.
    pub fn remove_behaviour<T: Behaviour>(&mut self, entity: EntityId) -> bool {
        self.behaviours
            .get_mut(&entity)
            .is_some_and(BehaviourSet::remove::<T>)
    }

    /// Returns the first behaviour of the given concrete type on an
    /// entity, scanning all categories.
    #[must_use]
    pub fn behaviour<T: Behaviour>(&self, entity: EntityId) -> Option<&T> {
        self.behaviours.get(&entity).and_then(BehaviourSet::get)
    }

    /// Returns the first behaviour of the given concrete type, mutably.
    pub fn behaviour_mut<T: Behaviour>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.behaviours
            .get_mut(&entity)
            .and_then(BehaviourSet::get_mut)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Submits an event for delivery on the next drain.
    pub fn fire_event(&mut self, event: Event) {
        self.state.queue.submit(event);
    }

    /// Submits an untargeted event: every active entity sees it.
    pub fn fire_event_to_all(&mut self, kind: impl Into<EventKind>) {
        self.state.queue.submit(Event::new(kind));
    }

    /// Returns the number of events awaiting the next drain.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.state.queue.len()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The category dispatch order, earliest first.
    #[must_use]
    pub fn category_order(&self) -> &[String] {
        &self.category_order
    }

    /// Replaces the category dispatch order. Takes effect at the next
    /// update.
    pub fn set_category_order(&mut self, order: Vec<String>) {
        self.category_order = order;
    }

    // =========================================================================
    // Tags and groups
    // =========================================================================

    /// Binds a tag to an entity; first claim wins. Returns whether the
    /// binding was created.
    pub fn add_tag(&mut self, tag: &str, entity: EntityId) -> bool {
        self.state.tags.add(tag, entity)
    }

    /// Looks up the entity bound to a tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTag`](spindle_foundation::Error::UnknownTag)
    /// if the tag is not bound.
    pub fn entity_by_tag(&self, tag: &str) -> Result<EntityId> {
        self.state.tags.entity(tag)
    }

    /// Adds an entity to a group, creating the group if needed.
    pub fn add_to_group(&mut self, group: &str, entity: EntityId) {
        self.state.groups.add(group, entity);
    }

    /// Returns the members of a group in insertion order.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`Error::UnknownGroup`](spindle_foundation::Error::UnknownGroup) if
    /// the group has never had a member.
    pub fn entities_in_group(&self, group: &str) -> Result<&[EntityId]> {
        self.state.groups.entities(group)
    }

    // =========================================================================
    // Update cycle
    // =========================================================================

    /// Advances the simulation by one tick.
    ///
    /// Strictly in order: promote pending-created entities (each queues a
    /// targeted `CreatedEntity` event), demote pending-destroyed entities
    /// (purging their tags, groups, components, and behaviours), submit
    /// the global `Tick` event, then drain and dispatch every event that
    /// was pending at that point to a stable snapshot of the active set.
    ///
    /// Events submitted during the drain - by reacting behaviours - land
    /// in the fresh buffer and are delivered on the next call.
    pub fn update(&mut self) {
        self.promote_and_demote();

        self.state.queue.submit(Event::tick());

        let snapshot = self.state.lifecycle.snapshot();
        let batch = self.state.queue.take_batch();
        let order = self.category_order.clone();

        for mut event in batch {
            for &entity in &snapshot {
                if event.target().is_some_and(|t| t != entity) {
                    continue;
                }
                if let Some(set) = self.behaviours.get_mut(&entity) {
                    let mut ctx = Context {
                        state: &mut self.state,
                        owner: entity,
                    };
                    set.dispatch(&mut ctx, &order, &mut event);
                }
            }
        }

        self.flush_deferred();
    }

    /// Drains the lifecycle buffers: new entities in, destroyed entities
    /// out, before any dispatch happens this tick.
    fn promote_and_demote(&mut self) {
        let WorldState {
            lifecycle,
            components,
            tags,
            groups,
            queue,
            deferred: _,
        } = &mut self.state;

        lifecycle.promote_created(|id| queue.submit(Event::created(id)));

        for entity in lifecycle.demote_destroyed(tags, groups) {
            components.remove_entity(entity);
            self.behaviours.remove(&entity);
        }
    }

    /// Moves mid-dispatch behaviour attachments into the behaviour table.
    fn flush_deferred(&mut self) {
        for (entity, behaviour) in std::mem::take(&mut self.state.deferred) {
            self.behaviours.entry(entity).or_default().insert(behaviour);
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("active", &self.len())
            .field("pending_events", &self.pending_events())
            .field("category_order", &self.category_order)
            .finish_non_exhaustive()
    }
}

/// The world as seen from inside a behaviour's event handler.
///
/// Carries the owning entity's id (behaviours hold no back-reference of
/// their own) and mutable access to components, lifecycle, events, tags,
/// and groups. Behaviour attachment is deferred until the end of the
/// running update.
pub struct Context<'w> {
    state: &'w mut WorldState,
    owner: EntityId,
}

impl Context<'_> {
    #[cfg(test)]
    pub(crate) fn new(state: &mut WorldState, owner: EntityId) -> Context<'_> {
        Context { state, owner }
    }

    /// The entity this behaviour is attached to.
    #[must_use]
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Submits an event; it is delivered on a later drain, never within
    /// the current dispatch pass.
    pub fn fire_event(&mut self, event: Event) {
        self.state.queue.submit(event);
    }

    /// Submits an untargeted event for all active entities.
    pub fn fire_event_to_all(&mut self, kind: impl Into<EventKind>) {
        self.state.queue.submit(Event::new(kind));
    }

    /// Creates an entity in the pending-created state.
    pub fn create_entity(&mut self) -> EntityId {
        self.state.lifecycle.create()
    }

    /// Marks an entity for destruction and queues its `DestroyedEntity`
    /// event.
    pub fn destroy_entity(&mut self, entity: EntityId) {
        self.state.destroy_entity(entity);
    }

    /// Checks if an entity is currently active.
    #[must_use]
    pub fn is_active(&self, entity: EntityId) -> bool {
        self.state.lifecycle.is_active(entity)
    }

    /// Attaches a component, overwriting any existing one of the same type.
    pub fn add_component<T: Any>(&mut self, entity: EntityId, component: T) {
        self.state.components.insert(entity, component);
    }

    /// Reads a component of an entity.
    #[must_use]
    pub fn component<T: Any>(&self, entity: EntityId) -> Option<&T> {
        self.state.components.get(entity)
    }

    /// Reads a component of an entity, mutably.
    pub fn component_mut<T: Any>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.state.components.get_mut(entity)
    }

    /// Checks whether an entity has a component of the given type.
    #[must_use]
    pub fn has_component<T: Any>(&self, entity: EntityId) -> bool {
        self.state.components.contains::<T>(entity)
    }

    /// Detaches and returns a component.
    pub fn remove_component<T: Any>(&mut self, entity: EntityId) -> Option<T> {
        self.state.components.remove(entity)
    }

    /// Attaches a behaviour to an entity.
    ///
    /// Deferred: the attachment lands in the behaviour table at the end of
    /// the current update, after the drain loop.
    pub fn add_behaviour(&mut self, entity: EntityId, behaviour: impl Behaviour) {
        self.state.deferred.push((entity, Box::new(behaviour)));
    }

    /// Binds a tag to an entity; first claim wins.
    pub fn add_tag(&mut self, tag: &str, entity: EntityId) -> bool {
        self.state.tags.add(tag, entity)
    }

    /// Looks up the entity bound to a tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTag`](spindle_foundation::Error::UnknownTag)
    /// if the tag is not bound.
    pub fn entity_by_tag(&self, tag: &str) -> Result<EntityId> {
        self.state.tags.entity(tag)
    }

    /// Adds an entity to a group.
    pub fn add_to_group(&mut self, group: &str, entity: EntityId) {
        self.state.groups.add(group, entity);
    }

    /// Returns the members of a group in insertion order.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`Error::UnknownGroup`](spindle_foundation::Error::UnknownGroup) if
    /// the group has never had a member.
    pub fn entities_in_group(&self, group: &str) -> Result<&[EntityId]> {
        self.state.groups.entities(group)
    }
}
