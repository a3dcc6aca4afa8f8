//! Definition records and the entity registry.
//!
//! This crate provides:
//! - [`KeyValue`], [`IoDef`], [`EntityDef`] - The records one FGD block produces
//! - [`Fgd`] - The registry of every parsed class, plus map bounds
//! - [`EntityRef`], [`MergedView`] - Lookups that follow the inheritance chain

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod fgd;
pub mod io;
pub mod keyvalue;
pub mod view;

pub use entity::{BaseRef, EntityDef, EntityId, Helper};
pub use fgd::Fgd;
pub use io::IoDef;
pub use keyvalue::{Choice, FlagBit, FlagEntry, KeyValue, ValueList};
pub use view::{EntityRef, MergedView};
