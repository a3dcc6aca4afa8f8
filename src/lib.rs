//! fgdkit - FGD entity definition toolkit
//!
//! This crate re-exports all layers of the fgdkit system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: fgdkit_runtime     - CLI, inspector REPL, snapshots
//! Layer 3: fgdkit_binary      - Compact binary encoding
//! Layer 2: fgdkit_language    - Lexer, entity grammar, include loader
//! Layer 1: fgdkit_schema      - Entity registry, base linking, merged views
//! Layer 0: fgdkit_foundation  - Core types (ValueType, EntityCategory, Error)
//! ```

pub use fgdkit_binary as binary;
pub use fgdkit_foundation as foundation;
pub use fgdkit_language as language;
pub use fgdkit_runtime as runtime;
pub use fgdkit_schema as schema;
