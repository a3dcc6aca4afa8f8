//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, value types, categories, helpers and case folding.

mod errors;
mod types;
