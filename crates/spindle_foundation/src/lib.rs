//! Core types, values, and errors for Spindle.
//!
//! This crate provides:
//! - [`EntityId`] - Monotonic entity identifiers
//! - [`Value`] - The payload value type for events
//! - [`Error`] - Error types for the few fallible operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod entity;
mod error;
mod value;

pub use entity::EntityId;
pub use error::{Error, Result};
pub use value::Value;
