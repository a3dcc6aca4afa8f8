//! Core types shared by every fgdkit layer.
//!
//! This crate provides:
//! - [`ValueType`], [`EntityCategory`], [`HelperKind`] - The fixed type registries
//! - [`Error`] - Error taxonomy with source context
//! - [`fold_case`] - Case folding used for every lookup key

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod case;
pub mod error;
pub mod types;

pub use case::{eq_folded, fold_case};
pub use error::{CapacityError, Error, ErrorContext, ErrorKind, FormatError, Result, SemanticError};
pub use types::{CATEGORY_ORDER, EntityCategory, HelperKind, TYPE_ORDER, ValueType};
