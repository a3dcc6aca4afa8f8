//! Input and output definitions.

use fgdkit_foundation::ValueType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named signal an entity can receive or emit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IoDef {
    /// Name as written in the source.
    pub name: String,
    /// Parameter type. Never `choices` or `flags`.
    pub value_type: ValueType,
    /// Help text.
    pub description: String,
}

impl IoDef {
    /// Creates an IO definition without a description.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
