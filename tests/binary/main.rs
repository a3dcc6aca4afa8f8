//! Integration tests for Layer 3: Binary
//!
//! Tests for the compact encoded format.

mod codec;
