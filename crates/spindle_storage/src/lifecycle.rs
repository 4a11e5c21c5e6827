//! Deferred entity lifecycle management.
//!
//! Creation and destruction are buffered: `create` and `destroy` only record
//! intent, and the buffers are drained once per world update, before any
//! event dispatch. Structural mutation of the active set therefore never
//! happens while a dispatch pass is iterating it.

use std::collections::HashSet;

use spindle_foundation::EntityId;

use crate::group::GroupIndex;
use crate::tag::TagIndex;

/// Tracks active entities plus pending-created and pending-destroyed buffers.
///
/// The monotonic id counter lives on the instance, not in process-wide
/// state, so independent worlds never collide. Ids are never reused.
#[derive(Debug, Default)]
pub struct EntityLifecycle {
    /// Next id to mint.
    next_id: u64,
    /// Active entities in insertion (promotion) order.
    ///
    /// A persistent vector so one dispatch pass can snapshot it in O(1).
    active: im::Vector<EntityId>,
    /// Membership mirror of `active` for O(1) `is_active`.
    active_set: HashSet<EntityId>,
    /// Entities created but not yet promoted, in creation order.
    pending_created: Vec<EntityId>,
    /// Entities marked for destruction, deduplicated on insert.
    pending_destroyed: Vec<EntityId>,
}

impl EntityLifecycle {
    /// Creates a new empty lifecycle service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new entity in the pending-created state.
    ///
    /// The entity does not appear in the active set until the next
    /// [`promote_created`](Self::promote_created). The id is returned
    /// immediately so the caller can attach components and behaviours
    /// before activation.
    pub fn create(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.pending_created.push(id);
        id
    }

    /// Marks an entity as pending-destroy.
    ///
    /// The entity remains active (and continues to receive dispatched
    /// events) until the next [`demote_destroyed`](Self::demote_destroyed).
    /// Re-destroying an already-pending entity is a no-op, as is destroying
    /// an id this lifecycle never produced.
    pub fn destroy(&mut self, id: EntityId) {
        let known = self.active_set.contains(&id) || self.pending_created.contains(&id);
        if known && !self.pending_destroyed.contains(&id) {
            self.pending_destroyed.push(id);
        }
    }

    /// Promotes every pending-created entity into the active set.
    ///
    /// Entities are promoted in creation order; `emit` is called once per
    /// promoted entity (the world uses this to queue a targeted
    /// `CreatedEntity` event, delivered on a later drain).
    pub fn promote_created(&mut self, mut emit: impl FnMut(EntityId)) {
        for id in self.pending_created.drain(..) {
            self.active.push_back(id);
            self.active_set.insert(id);
            emit(id);
        }
    }

    /// Demotes every pending-destroy entity out of the active set.
    ///
    /// Tag and group memberships of each demoted entity are purged. Returns
    /// the demoted ids so the caller can drop per-entity state it owns
    /// (components, behaviours).
    pub fn demote_destroyed(&mut self, tags: &mut TagIndex, groups: &mut GroupIndex) -> Vec<EntityId> {
        let demoted: Vec<EntityId> = self.pending_destroyed.drain(..).collect();
        for &id in &demoted {
            if self.active_set.remove(&id) {
                if let Some(pos) = self.active.index_of(&id) {
                    self.active.remove(pos);
                }
            }
            tags.remove_entity(id);
            groups.remove_entity(id);
        }
        demoted
    }

    /// Checks if an entity is currently active.
    #[must_use]
    pub fn is_active(&self, id: EntityId) -> bool {
        self.active_set.contains(&id)
    }

    /// Iterates over active entities in promotion order.
    pub fn active(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.active.iter().copied()
    }

    /// Returns an O(1) structural-sharing snapshot of the active list.
    ///
    /// The snapshot is stable for the duration of a dispatch pass even if
    /// entities are marked for destruction mid-pass.
    #[must_use]
    pub fn snapshot(&self) -> im::Vector<EntityId> {
        self.active.clone()
    }

    /// Returns the number of active entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns true if there are no active entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Returns the number of entities awaiting promotion.
    #[must_use]
    pub fn pending_created(&self) -> usize {
        self.pending_created.len()
    }

    /// Returns the number of entities awaiting demotion.
    #[must_use]
    pub fn pending_destroyed(&self) -> usize {
        self.pending_destroyed.len()
    }
}
