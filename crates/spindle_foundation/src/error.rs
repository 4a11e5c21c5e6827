//! Error types for the Spindle system.
//!
//! Uses `thiserror` for ergonomic error definition. The error surface is
//! deliberately small: almost every operation in the core is a silent no-op
//! when its target is absent, and only lookups by unknown tag or group names
//! fail hard. Callers who expect absence should check membership first.

use thiserror::Error;

/// Convenience alias for results using the Spindle [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for Spindle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lookup by a tag that is not bound to any entity.
    #[error("unknown tag: {0}")]
    UnknownTag(String),

    /// Lookup of a group that has never had a member.
    #[error("unknown group: {0}")]
    UnknownGroup(String),
}

impl Error {
    /// Creates an unknown-tag error.
    #[must_use]
    pub fn unknown_tag(tag: impl Into<String>) -> Self {
        Self::UnknownTag(tag.into())
    }

    /// Creates an unknown-group error.
    #[must_use]
    pub fn unknown_group(group: impl Into<String>) -> Self {
        Self::UnknownGroup(group.into())
    }
}
