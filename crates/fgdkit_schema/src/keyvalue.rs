//! Keyvalue definitions and their value lists.

use fgdkit_foundation::ValueType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single spawnflag bit, stored as its base-2 exponent.
///
/// Only powers of two with an exponent in `0..=127` are representable,
/// which is exactly what the 7-bit packed field of the binary format
/// can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagBit(u8);

impl FlagBit {
    /// Largest exponent a flag may use.
    pub const MAX_POWER: u8 = 127;

    /// Creates a flag from its exponent, or `None` above [`Self::MAX_POWER`].
    #[must_use]
    pub const fn from_power(power: u8) -> Option<Self> {
        if power <= Self::MAX_POWER {
            Some(Self(power))
        } else {
            None
        }
    }

    /// Creates a flag from its bit value, or `None` unless it is a power of two.
    #[must_use]
    pub const fn from_value(value: u128) -> Option<Self> {
        if value.is_power_of_two() {
            // trailing_zeros of a u128 is at most 127.
            #[allow(clippy::cast_possible_truncation)]
            let power = value.trailing_zeros() as u8;
            Some(Self(power))
        } else {
            None
        }
    }

    /// Returns the exponent.
    #[must_use]
    pub const fn power(self) -> u8 {
        self.0
    }

    /// Returns the bit value, `1 << power`.
    #[must_use]
    pub const fn value(self) -> u128 {
        1u128 << self.0
    }
}

/// One entry of a `flags` list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagEntry {
    /// The bit this entry toggles.
    pub bit: FlagBit,
    /// Label shown in the editor.
    pub label: String,
    /// Whether the bit is set on newly placed entities.
    pub default: bool,
}

impl FlagEntry {
    /// Creates a flag entry.
    #[must_use]
    pub fn new(bit: FlagBit, label: impl Into<String>, default: bool) -> Self {
        Self {
            bit,
            label: label.into(),
            default,
        }
    }
}

/// One entry of a `choices` list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Choice {
    /// Raw value stored in the map.
    pub value: String,
    /// Label shown in the editor.
    pub label: String,
}

impl Choice {
    /// Creates a choice.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The value list of a list-bearing keyvalue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueList {
    /// Entries of a `flags` keyvalue.
    Flags(Vec<FlagEntry>),
    /// Entries of a `choices` keyvalue.
    Choices(Vec<Choice>),
}

impl ValueList {
    /// Returns an empty list of the shape `value_type` requires, if any.
    #[must_use]
    pub const fn empty_for(value_type: ValueType) -> Option<Self> {
        match value_type {
            ValueType::Flags => Some(Self::Flags(Vec::new())),
            ValueType::Choices => Some(Self::Choices(Vec::new())),
            _ => None,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flags(flags) => flags.len(),
            Self::Choices(choices) => choices.len(),
        }
    }

    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A typed property that entities of a class can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyValue {
    /// Name as written in the source.
    pub name: String,
    /// The value type.
    pub value_type: ValueType,
    /// Name shown in the editor.
    pub display_name: String,
    /// Default value as raw text; empty when not given.
    pub default: String,
    /// Help text.
    pub description: String,
    /// Whether the editor prevents changing the value.
    pub readonly: bool,
    /// Present exactly when `value_type` is list-bearing.
    pub values: Option<ValueList>,
}

impl KeyValue {
    /// Creates a keyvalue whose display name is its own name.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            value_type,
            default: String::new(),
            description: String::new(),
            readonly: false,
            values: ValueList::empty_for(value_type),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the keyvalue read-only.
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Appends a flag entry. Ignored unless this is a `flags` keyvalue.
    #[must_use]
    pub fn with_flag(mut self, entry: FlagEntry) -> Self {
        if let Some(ValueList::Flags(flags)) = &mut self.values {
            flags.push(entry);
        }
        self
    }

    /// Appends a choice. Ignored unless this is a `choices` keyvalue.
    #[must_use]
    pub fn with_choice(mut self, choice: Choice) -> Self {
        if let Some(ValueList::Choices(choices)) = &mut self.values {
            choices.push(choice);
        }
        self
    }

    /// Returns the flag entries, empty for other types.
    #[must_use]
    pub fn flags(&self) -> &[FlagEntry] {
        match &self.values {
            Some(ValueList::Flags(flags)) => flags,
            _ => &[],
        }
    }

    /// Returns the choices, empty for other types.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        match &self.values {
            Some(ValueList::Choices(choices)) => choices,
            _ => &[],
        }
    }

    /// Returns the combined bits of every default-on flag.
    #[must_use]
    pub fn default_flags(&self) -> u128 {
        self.flags()
            .iter()
            .filter(|flag| flag.default)
            .fold(0, |acc, flag| acc | flag.bit.value())
    }
}
