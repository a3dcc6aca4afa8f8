//! CLI, inspector and snapshots for FGD databases.
//!
//! This crate provides:
//! - [`Inspector`] - Interactive browser over a loaded database
//! - [`cli`] - Argument parsing and database opening for the `fgdkit` binary
//! - [`snapshot`] - Lossless MessagePack snapshots
//! - [`setup_tracing`] - Subscriber setup for binaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod editor;
pub mod inspect;
pub mod logging;
pub mod snapshot;

pub use cli::{CliConfig, CliError, Command, open_database, parse_args, summary};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use inspect::{Inspector, Reply};
pub use logging::setup_tracing;
