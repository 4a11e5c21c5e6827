//! The behaviour contract.
//!
//! A behaviour is a polymorphic unit of logic attached to an entity. It
//! declares a category (coarse dispatch ordering), a priority (fine
//! ordering within the category, lower first), and the set of event types
//! it listens to. The two lifecycle event types are always subscribed.

use std::any::Any;
use std::collections::HashSet;

use crate::event::{self, Event, EventKind};
use crate::world::Context;

/// The category used when a behaviour does not declare one.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Control signal returned by [`Behaviour::handle_event`].
///
/// `Stop` halts dispatch of the current event to the current entity only:
/// no later-ordered behaviour on that entity sees the event, but dispatch
/// to other entities and of other events is unaffected. It is an in-band
/// signal, not an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Continue with the next behaviour in dispatch order.
    Continue,
    /// Stop dispatching this event to this entity.
    Stop,
}

/// The set of event types a behaviour listens to.
///
/// Always contains the two lifecycle event types; additional types are
/// added via [`subscribe`](Self::subscribe) or the [`with`](Self::with)
/// builder.
#[derive(Clone, Debug)]
pub struct Subscriptions {
    kinds: HashSet<EventKind>,
}

impl Subscriptions {
    /// Creates a subscription set containing only the lifecycle types.
    #[must_use]
    pub fn new() -> Self {
        let mut kinds = HashSet::new();
        kinds.insert(EventKind::new(event::CREATED_ENTITY));
        kinds.insert(EventKind::new(event::DESTROYED_ENTITY));
        Self { kinds }
    }

    /// Adds an event type, builder style.
    #[must_use]
    pub fn with(mut self, kind: impl Into<EventKind>) -> Self {
        self.subscribe(kind);
        self
    }

    /// Adds an event type. Re-subscribing is a no-op.
    pub fn subscribe(&mut self, kind: impl Into<EventKind>) {
        self.kinds.insert(kind.into());
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// Returns the number of subscribed event types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false: the lifecycle types are never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of logic attached to one entity for its lifetime.
///
/// Behaviours react to events that target their owning entity (or to
/// broadcasts). The owning entity is not stored on the behaviour; it is
/// supplied through [`Context::owner`] on every invocation, which avoids
/// ownership cycles between an entity and its behaviours.
pub trait Behaviour: Any {
    /// The category this behaviour dispatches under.
    fn category(&self) -> &str {
        DEFAULT_CATEGORY
    }

    /// Dispatch priority within the category. Lower runs earlier; ties
    /// break by attach order.
    fn priority(&self) -> i32 {
        0
    }

    /// The event types this behaviour listens to.
    fn subscriptions(&self) -> &Subscriptions;

    /// Membership test on the subscription set.
    fn is_listening(&self, kind: &str) -> bool {
        self.subscriptions().contains(kind)
    }

    /// Reacts to an event delivered to the owning entity.
    ///
    /// The default implementation routes the three well-known event types
    /// to the corresponding hook and returns [`Outcome::Continue`].
    /// Override to handle other event types or to return
    /// [`Outcome::Stop`].
    fn handle_event(&mut self, ctx: &mut Context<'_>, event: &mut Event) -> Outcome {
        match event.kind().as_str() {
            event::CREATED_ENTITY => self.on_create(ctx),
            event::DESTROYED_ENTITY => self.on_destroy(ctx),
            event::TICK => self.on_tick(ctx),
            _ => {}
        }
        Outcome::Continue
    }

    /// Called when the owning entity is promoted into the active set.
    fn on_create(&mut self, _ctx: &mut Context<'_>) {}

    /// Called when a `DestroyedEntity` event reaches the owning entity.
    fn on_destroy(&mut self, _ctx: &mut Context<'_>) {}

    /// Called once per update, if subscribed to `Tick`.
    fn on_tick(&mut self, _ctx: &mut Context<'_>) {}
}
