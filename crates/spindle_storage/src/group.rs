//! Group index: named sets of entities.
//!
//! A group is a named, insertion-ordered set of entities. An entity can
//! belong to any number of groups. Bidirectional maps keep membership
//! queries and per-entity purging cheap.

use std::collections::HashMap;

use spindle_foundation::{EntityId, Error, Result};

/// Index of named entity groups.
///
/// A group becomes known the first time an entity is added to it and stays
/// known afterwards, even when emptied. Lookup of a never-seen group is a
/// hard failure; callers who expect absence should check
/// [`contains`](Self::contains) first.
#[derive(Debug, Default)]
pub struct GroupIndex {
    /// Forward: group -> members in insertion order.
    by_group: HashMap<String, Vec<EntityId>>,
    /// Reverse: entity -> groups it belongs to.
    by_entity: HashMap<EntityId, Vec<String>>,
}

impl GroupIndex {
    /// Creates an empty group index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity to a group, creating the group if needed.
    ///
    /// Re-adding an existing member is a silent no-op.
    pub fn add(&mut self, group: &str, entity: EntityId) {
        let members = self.by_group.entry(group.to_string()).or_default();
        if members.contains(&entity) {
            return;
        }
        members.push(entity);
        self.by_entity
            .entry(entity)
            .or_default()
            .push(group.to_string());
    }

    /// Returns the members of a group in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGroup`] if the group has never had a member.
    pub fn entities(&self, group: &str) -> Result<&[EntityId]> {
        self.by_group
            .get(group)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::unknown_group(group))
    }

    /// Checks if a group is known.
    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.by_group.contains_key(group)
    }

    /// Checks if an entity is a member of a group.
    #[must_use]
    pub fn is_member(&self, group: &str, entity: EntityId) -> bool {
        self.by_group
            .get(group)
            .is_some_and(|members| members.contains(&entity))
    }

    /// Removes an entity from a single group.
    ///
    /// Removing a non-member, or from an unknown group, is a no-op.
    pub fn remove(&mut self, group: &str, entity: EntityId) {
        if let Some(members) = self.by_group.get_mut(group) {
            members.retain(|&e| e != entity);
        }
        if let Some(groups) = self.by_entity.get_mut(&entity) {
            groups.retain(|g| g != group);
            if groups.is_empty() {
                self.by_entity.remove(&entity);
            }
        }
    }

    /// Removes an entity from every group it belongs to.
    pub fn remove_entity(&mut self, entity: EntityId) {
        if let Some(groups) = self.by_entity.remove(&entity) {
            for group in groups {
                if let Some(members) = self.by_group.get_mut(&group) {
                    members.retain(|&e| e != entity);
                }
            }
        }
    }

    /// Returns the number of known groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_group.len()
    }

    /// Returns true if no groups are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_group.is_empty()
    }
}
