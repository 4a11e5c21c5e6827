//! Spindle - Deterministic entity/component/behaviour simulation core
//!
//! This crate re-exports all layers of the Spindle system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: spindle_engine     — events, behaviours, dispatch, world
//! Layer 1: spindle_storage    — entity lifecycle, components, tags, groups
//! Layer 0: spindle_foundation — core types (EntityId, Value, Error)
//! ```

pub use spindle_engine as engine;
pub use spindle_foundation as foundation;
pub use spindle_storage as storage;
