//! Error types for fgdkit.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every failure is fatal: callers see one [`Error`] per top-level parse,
//! encode or decode call.

use std::fmt;

use thiserror::Error;

use crate::types::ValueType;

/// Result type alias for fgdkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for fgdkit operations.
#[derive(Debug, Error)]
#[error("{kind}{}", location_suffix(.context.as_ref()))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

fn location_suffix(context: Option<&ErrorContext>) -> String {
    match context {
        Some(ctx) if ctx.source.is_some() || ctx.line.is_some() => format!(" ({ctx})"),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax(message.into()))
    }

    /// Creates a semantic error.
    #[must_use]
    pub fn semantic(error: SemanticError) -> Self {
        Self::new(ErrorKind::Semantic(error))
    }

    /// Creates a file not found error.
    #[must_use]
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileNotFound(path.into()))
    }

    /// Creates an I/O error for a file that exists but could not be read.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a capacity error.
    #[must_use]
    pub fn capacity(error: CapacityError) -> Self {
        Self::new(ErrorKind::Capacity(error))
    }

    /// Creates a binary format error.
    #[must_use]
    pub fn format(error: FormatError) -> Self {
        Self::new(ErrorKind::Format(error))
    }

    /// Returns true for malformed token sequences.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax(_))
    }

    /// Returns true for well-formed but meaningless definitions.
    #[must_use]
    pub const fn is_semantic(&self) -> bool {
        matches!(self.kind, ErrorKind::Semantic(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Malformed token sequence, unexpected token, or unterminated block.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Tokens are well formed but the definition is invalid.
    #[error("{0}")]
    Semantic(SemanticError),

    /// An `@include` target or root file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A file exists but could not be read.
    #[error("i/o error: {0}")]
    Io(String),

    /// A value does not fit the binary format.
    #[error("capacity exceeded: {0}")]
    Capacity(CapacityError),

    /// Binary input is not a valid encoded database.
    #[error("invalid binary data: {0}")]
    Format(FormatError),

    /// A snapshot could not be written or read back.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Definitions that tokenize correctly but make no sense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Type keyword in `name(type)` is not a known value type.
    #[error("unknown keyvalue type \"{0}\"")]
    UnknownValueType(String),

    /// Header helper name is not recognised.
    #[error("unknown helper type \"{0}\"")]
    UnknownHelper(String),

    /// `@Keyword` does not name an entity category.
    #[error("invalid entity type \"{0}\"")]
    UnknownCategory(String),

    /// A base class named in `base(...)` was never defined.
    #[error("unknown base ({base}) for {entity}")]
    UnknownBase {
        /// The missing base classname.
        base: String,
        /// The class that inherits from it.
        entity: String,
    },

    /// More than three attributes after a keyvalue.
    #[error("too many attributes for keyvalue \"{name}\" ({count})")]
    TooManyAttributes {
        /// The keyvalue name.
        name: String,
        /// How many attributes were given.
        count: usize,
    },

    /// More than a description after an input or output.
    #[error("too many values for IO definition \"{0}\"")]
    TooManyIoAttributes(String),

    /// An input or output declared with a list-bearing type.
    #[error("\"{0}\" value type is not valid for an input or output")]
    ListTypeForIo(ValueType),

    /// A `choices` or `flags` keyvalue without its `= [...]` list.
    #[error("no list for \"{value_type}\" keyvalue \"{name}\"")]
    MissingValueList {
        /// The keyvalue name.
        name: String,
        /// Its list-bearing type.
        value_type: ValueType,
    },

    /// A list attached to a type that takes none.
    #[error("\"{value_type}\" keyvalue \"{name}\" can't have a list")]
    UnexpectedValueList {
        /// The keyvalue name.
        name: String,
        /// Its type.
        value_type: ValueType,
    },

    /// A spawnflag value that is not an integer.
    #[error("spawnflags must be integer values, not \"{value}\" (in {entity})")]
    FlagNotInteger {
        /// The offending value text.
        value: String,
        /// The entity being parsed.
        entity: String,
    },

    /// A spawnflag value that is not a power of two.
    #[error("spawnflags must be powers of two, not {value} (in {entity})")]
    FlagNotPowerOfTwo {
        /// The offending value text.
        value: String,
        /// The entity being parsed.
        entity: String,
    },

    /// A spawnflag value that is a positive integer too large for any bit.
    #[error("spawnflags value {value} is above the highest supported bit (in {entity})")]
    FlagOutOfRange {
        /// The offending value text.
        value: String,
        /// The entity being parsed.
        entity: String,
    },

    /// A linked base whose id names no class in the registry.
    #[error("base link {id} of {entity} points at no class")]
    DanglingBase {
        /// The raw entity id.
        id: u32,
        /// The class holding the link.
        entity: String,
    },

    /// A list entry with the wrong number of fields.
    #[error("wrong number of values for list entry \"{value}\" of \"{key}\" ({count})")]
    BadListEntry {
        /// The keyvalue owning the list.
        key: String,
        /// The entry's raw value.
        value: String,
        /// How many colon-separated fields followed the value.
        count: usize,
    },

    /// A top-level token that is not a recognised directive.
    #[error("bad keyword \"{0}\"")]
    BadKeyword(String),

    /// `@mapsize` arguments that are not two integers.
    #[error("invalid @mapsize: ({0})")]
    InvalidMapSize(String),
}

/// Data that does not fit the fixed-width fields of the binary format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// More distinct strings than a 16-bit id can address.
    #[error("too many items in string dictionary (limit {limit})")]
    DictionaryOverflow {
        /// Maximum number of distinct strings.
        limit: usize,
    },

    /// A string longer than its 16-bit length prefix.
    #[error("string of {len} bytes exceeds the {limit} byte limit")]
    StringTooLong {
        /// Length in bytes.
        len: usize,
        /// Maximum length in bytes.
        limit: usize,
    },

    /// A count that does not fit its length field.
    #[error("{what} count {count} exceeds limit {limit} (in {entity})")]
    TooManyItems {
        /// What was being counted.
        what: &'static str,
        /// The actual count.
        count: usize,
        /// The field's maximum.
        limit: usize,
        /// The entity being encoded.
        entity: String,
    },
}

/// Malformed binary input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The file does not start with the magic bytes.
    #[error("not an FGD file")]
    BadMagic,

    /// The format version is newer than this decoder.
    #[error("unknown format version \"{0}\"")]
    UnknownVersion(u8),

    /// Input ended in the middle of a field.
    #[error("unexpected end of data at offset {offset} (needed {needed} bytes)")]
    Truncated {
        /// Byte offset of the read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },

    /// A dictionary string is not valid UTF-8.
    #[error("invalid UTF-8 in string dictionary entry {0}")]
    InvalidUtf8(usize),

    /// A value type index outside `TYPE_ORDER`.
    #[error("invalid value type index {0}")]
    InvalidValueType(u8),

    /// A packed flag exponent with no matching bit.
    #[error("invalid flag exponent {0}")]
    InvalidFlagPower(u8),

    /// A category index outside `CATEGORY_ORDER`.
    #[error("invalid entity category index {0}")]
    InvalidCategory(u8),

    /// A string id outside the dictionary.
    #[error("string id {id} out of range (dictionary has {len} entries)")]
    InvalidStringId {
        /// The id read.
        id: u16,
        /// Number of dictionary entries.
        len: usize,
    },

    /// A list-bearing type on an input or output.
    #[error("\"{0}\" value type is not valid for an input or output")]
    ListTypeForIo(ValueType),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Line number in source (1-based).
    pub line: Option<u32>,
    /// Column number in source (1-based).
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line, self.column) {
            (Some(source), Some(line), Some(col)) => write!(f, "at {source}:{line}:{col}"),
            (Some(source), Some(line), None) => write!(f, "at {source}:{line}"),
            (Some(source), None, _) => write!(f, "in {source}"),
            (None, Some(line), Some(col)) => write!(f, "at line {line}, column {col}"),
            (None, Some(line), None) => write!(f, "at line {line}"),
            (None, None, _) => Ok(()),
        }
    }
}
