//! Typed events with optional target and mutable payload.
//!
//! An event is an immutable type tag plus a key/value payload. Events are
//! values: once queued they are owned by the queue, and during a dispatch
//! pass a single mutable reference threads through every entity and
//! behaviour, so payload writes by one behaviour are observed by every
//! later-ordered behaviour handling the same event in the same pass.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use spindle_foundation::{EntityId, Value};

/// Event type fired at an entity when it is promoted into the active set.
pub const CREATED_ENTITY: &str = "CreatedEntity";

/// Event type fired at an entity when it is marked for destruction.
pub const DESTROYED_ENTITY: &str = "DestroyedEntity";

/// Event type broadcast to all active entities once per update.
pub const TICK: &str = "Tick";

/// An event type name.
///
/// A cheap shared-string handle: clone is a reference-count bump and
/// equality short-circuits on pointer identity before comparing bytes.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct EventKind(Arc<str>);

impl EventKind {
    /// Creates an event kind from a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }

    /// Returns the name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EventKind {
    fn from(name: String) -> Self {
        Self(name.into())
    }
}

impl PartialEq<str> for EventKind {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EventKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventKind({:?})", self.as_str())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed message with an optional target and a mutable payload.
///
/// No target means broadcast: the event reaches every active entity.
/// A targeted event reaches only its target.
#[derive(Clone, Debug)]
pub struct Event {
    /// Type tag; fixed at construction.
    kind: EventKind,
    /// Target entity, or `None` to broadcast.
    target: Option<EntityId>,
    /// Key/value payload, readable and writable by any handling behaviour.
    payload: im::HashMap<Arc<str>, Value>,
}

impl Event {
    /// Creates a new untargeted event with an empty payload.
    #[must_use]
    pub fn new(kind: impl Into<EventKind>) -> Self {
        Self {
            kind: kind.into(),
            target: None,
            payload: im::HashMap::new(),
        }
    }

    /// Creates the `Tick` event broadcast once per update.
    #[must_use]
    pub fn tick() -> Self {
        Self::new(TICK)
    }

    /// Creates a `CreatedEntity` event targeted at a freshly promoted entity.
    #[must_use]
    pub fn created(target: EntityId) -> Self {
        Self::new(CREATED_ENTITY).with_target(target)
    }

    /// Creates a `DestroyedEntity` event targeted at an entity marked for
    /// destruction.
    #[must_use]
    pub fn destroyed(target: EntityId) -> Self {
        Self::new(DESTROYED_ENTITY).with_target(target)
    }

    /// Sets the target entity.
    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Adds a payload entry.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Returns the type tag of this event.
    #[must_use]
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Returns the target entity, if any.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Writes a payload entry, overwriting any existing value for the key.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.payload.insert(key.into(), value.into());
    }

    /// Reads a payload entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Reads a payload entry as an integer.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Reads a payload entry as a float (integers convert).
    #[must_use]
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    /// Reads a payload entry as a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Reads a payload entry as an entity reference.
    #[must_use]
    pub fn get_entity(&self, key: &str) -> Option<EntityId> {
        self.get(key).and_then(Value::as_entity)
    }

    /// Returns the number of payload entries.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}
