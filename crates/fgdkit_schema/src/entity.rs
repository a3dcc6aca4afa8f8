//! Entity class definitions.

use std::fmt;

use fgdkit_foundation::{EntityCategory, HelperKind, fold_case};
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::io::IoDef;
use crate::keyvalue::KeyValue;

/// Index of an entity within its [`Fgd`](crate::Fgd).
///
/// Ids are stable for the lifetime of the registry since entities are
/// never removed; redefining a class keeps its id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    /// Returns the raw index of this entity.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// One slot of an entity's base list.
///
/// Bases are recorded by name while parsing so that classes may inherit
/// from ones defined later, then linked by [`Fgd::resolve_bases`](crate::Fgd::resolve_bases).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BaseRef {
    /// Folded classname, not yet looked up.
    Unresolved(String),
    /// Link to another entity in the same registry.
    Resolved(EntityId),
}

impl BaseRef {
    /// Returns true once the slot is linked.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A header helper such as `size(-8 -8 -8, 8 8 8)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Helper {
    /// Which helper.
    pub kind: HelperKind,
    /// Comma separated arguments, trimmed. Empty when none were given.
    pub args: Vec<String>,
}

impl Helper {
    /// Creates a helper.
    #[must_use]
    pub fn new(kind: HelperKind, args: Vec<String>) -> Self {
        Self { kind, args }
    }
}

/// The definition of one entity class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityDef {
    /// What kind of class this is.
    pub category: EntityCategory,
    /// Classname as written in the source.
    pub classname: String,
    /// Classes inherited from, in declaration order.
    pub bases: Vec<BaseRef>,
    /// Own keyvalues, keyed by folded name.
    pub keyvalues: IndexMap<String, KeyValue>,
    /// Own inputs, keyed by folded name.
    pub inputs: IndexMap<String, IoDef>,
    /// Own outputs, keyed by folded name.
    pub outputs: IndexMap<String, IoDef>,
    /// Editor helpers from the header.
    pub helpers: Vec<Helper>,
    /// Help text.
    pub description: String,
}

impl EntityDef {
    /// Creates an empty definition.
    #[must_use]
    pub fn new(category: EntityCategory, classname: impl Into<String>) -> Self {
        Self {
            category,
            classname: classname.into(),
            bases: Vec::new(),
            keyvalues: IndexMap::new(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            helpers: Vec::new(),
            description: String::new(),
        }
    }

    /// Adds a base by name unless an equal name is already listed.
    pub fn add_base(&mut self, name: &str) {
        let folded = fold_case(name.trim());
        let present = self
            .bases
            .iter()
            .any(|base| matches!(base, BaseRef::Unresolved(existing) if *existing == folded));
        if !present {
            self.bases.push(BaseRef::Unresolved(folded));
        }
    }

    /// Inserts a keyvalue, replacing any with the same folded name.
    pub fn insert_keyvalue(&mut self, keyvalue: KeyValue) {
        self.keyvalues.insert(fold_case(&keyvalue.name), keyvalue);
    }

    /// Inserts an input, replacing any with the same folded name.
    pub fn insert_input(&mut self, input: IoDef) {
        self.inputs.insert(fold_case(&input.name), input);
    }

    /// Inserts an output, replacing any with the same folded name.
    pub fn insert_output(&mut self, output: IoDef) {
        self.outputs.insert(fold_case(&output.name), output);
    }

    /// Returns true for `@BaseClass` definitions.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.category == EntityCategory::Base
    }
}

impl fmt::Display for EntityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_base() {
            write!(f, "<Entity Base \"{}\">", self.classname)
        } else {
            write!(f, "<Entity {}>", self.classname)
        }
    }
}
