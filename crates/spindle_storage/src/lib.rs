//! Entity lifecycle, component storage, and tag/group indices for Spindle.
//!
//! This crate provides:
//! - [`EntityLifecycle`] - Deferred entity creation and destruction
//! - [`ComponentStore`] / [`ComponentSet`] - One-slot-per-type component storage
//! - [`TagIndex`] - Unique string-to-entity bindings
//! - [`GroupIndex`] - Named entity sets

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod component;
mod group;
mod lifecycle;
mod tag;

pub use component::{ComponentSet, ComponentStore};
pub use group::GroupIndex;
pub use lifecycle::EntityLifecycle;
pub use tag::TagIndex;
