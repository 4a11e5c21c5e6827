//! Single-buffered event queue.
//!
//! The queue accepts submissions at any time, including from behaviours
//! reacting to an event mid-dispatch. Draining swaps the pending buffer for
//! an empty one, so the set of events visited in one dispatch pass is fixed
//! at the start of that pass: an event fired as a reaction to another is
//! deferred to the next update. This bounds recursive event chains to one
//! hop per tick instead of risking unbounded same-tick recursion, at the
//! cost of one tick of delivery latency per hop.

use std::collections::VecDeque;

use crate::event::Event;

/// An ordered, unbounded FIFO buffer of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Events awaiting the next drain, oldest first.
    pending: VecDeque<Event>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event to the tail of the pending buffer. O(1).
    pub fn submit(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Swaps the pending buffer for an empty one and returns it.
    ///
    /// Events submitted after this call land in the fresh buffer and are
    /// not part of the returned batch.
    #[must_use]
    pub fn take_batch(&mut self) -> VecDeque<Event> {
        std::mem::take(&mut self.pending)
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
