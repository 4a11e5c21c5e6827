//! Integration tests for Layer 1: Storage
//!
//! Tests for the entity lifecycle, component storage, and tag/group indices.
