//! Integration tests for Layer 2: Language
//!
//! Tests for the lexer, the entity grammar and include handling.

mod includes;
mod lexer;
mod parser;
