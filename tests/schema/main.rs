//! Integration tests for Layer 1: Schema
//!
//! Tests for the entity registry, base linking and merged lookups.

mod registry;
