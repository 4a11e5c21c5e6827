//! Tag index: unique string-to-entity bindings.
//!
//! A tag names at most one entity. Bidirectional maps keep forward lookup
//! and per-entity purging both O(1) in the number of affected tags.

use std::collections::HashMap;

use spindle_foundation::{EntityId, Error, Result};

/// Index of unique tags bound to entities.
///
/// First claim wins: re-registering a tag that is already bound (to any
/// entity) is a silent no-op. Lookup of an unknown tag is a hard failure;
/// callers who expect absence should check [`contains`](Self::contains)
/// first.
#[derive(Debug, Default)]
pub struct TagIndex {
    /// Forward: tag -> entity.
    by_tag: HashMap<String, EntityId>,
    /// Reverse: entity -> tags it holds.
    by_entity: HashMap<EntityId, Vec<String>>,
}

impl TagIndex {
    /// Creates an empty tag index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a tag to an entity.
    ///
    /// Returns `true` if the binding was created. If the tag is already
    /// bound - to this entity or any other - nothing changes and `false`
    /// is returned.
    pub fn add(&mut self, tag: &str, entity: EntityId) -> bool {
        if self.by_tag.contains_key(tag) {
            return false;
        }
        self.by_tag.insert(tag.to_string(), entity);
        self.by_entity
            .entry(entity)
            .or_default()
            .push(tag.to_string());
        true
    }

    /// Looks up the entity bound to a tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTag`] if the tag is not bound.
    pub fn entity(&self, tag: &str) -> Result<EntityId> {
        self.by_tag
            .get(tag)
            .copied()
            .ok_or_else(|| Error::unknown_tag(tag))
    }

    /// Checks if a tag is bound.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Unbinds a single tag. Unbinding an absent tag is a no-op.
    pub fn remove(&mut self, tag: &str) {
        if let Some(entity) = self.by_tag.remove(tag) {
            if let Some(tags) = self.by_entity.get_mut(&entity) {
                tags.retain(|t| t != tag);
                if tags.is_empty() {
                    self.by_entity.remove(&entity);
                }
            }
        }
    }

    /// Purges every tag bound to an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        if let Some(tags) = self.by_entity.remove(&entity) {
            for tag in tags {
                self.by_tag.remove(&tag);
            }
        }
    }

    /// Returns the number of bound tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Returns true if no tags are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}
