//! Events, behaviours, dispatch, and world orchestration for Spindle.
//!
//! This crate provides:
//! - [`Event`] / [`EventKind`] - Typed messages with optional target and mutable payload
//! - [`EventQueue`] - Single-buffered FIFO with one-tick deferral of reactive events
//! - [`Behaviour`] - Logic units with category, priority, and event subscriptions
//! - [`BehaviourSet`] - Per-entity category/priority-ordered dispatch
//! - [`World`] - The update/dispatch orchestrator

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod behaviour;
pub mod entity;
pub mod event;
pub mod queue;
pub mod world;

pub use behaviour::{Behaviour, Outcome, Subscriptions};
pub use entity::BehaviourSet;
pub use event::{Event, EventKind};
pub use queue::EventQueue;
pub use world::{Context, World};
