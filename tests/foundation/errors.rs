//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use fgdkit_foundation::{
    CapacityError, Error, ErrorContext, ErrorKind, FormatError, SemanticError, ValueType,
};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_syntax() {
    let err = Error::syntax("unterminated string");
    assert!(err.is_syntax());
    assert!(!err.is_semantic());
    assert_eq!(format!("{err}"), "syntax error: unterminated string");
}

#[test]
fn error_unknown_base() {
    let err = Error::semantic(SemanticError::UnknownBase {
        base: "Targetname".into(),
        entity: "info_target".into(),
    });
    assert!(err.is_semantic());
    assert_eq!(format!("{err}"), "unknown base (Targetname) for info_target");
}

#[test]
fn error_flag_messages() {
    let not_int = SemanticError::FlagNotInteger {
        value: "abc".into(),
        entity: "spawnflags".into(),
    };
    assert!(not_int.to_string().contains("integer values"));

    let not_power = SemanticError::FlagNotPowerOfTwo {
        value: "3".into(),
        entity: "spawnflags".into(),
    };
    assert!(not_power.to_string().contains("powers of two, not 3"));
}

#[test]
fn error_list_type_for_io() {
    let err = Error::semantic(SemanticError::ListTypeForIo(ValueType::Choices));
    assert_eq!(
        format!("{err}"),
        "\"choices\" value type is not valid for an input or output"
    );
}

#[test]
fn error_capacity() {
    let err = Error::capacity(CapacityError::DictionaryOverflow { limit: 65536 });
    assert!(matches!(err.kind, ErrorKind::Capacity(_)));
    assert!(format!("{err}").contains("65536"));
}

#[test]
fn error_format() {
    let err = Error::format(FormatError::UnknownVersion(9));
    assert_eq!(format!("{err}"), "invalid binary data: unknown format version \"9\"");
    assert_eq!(
        Error::format(FormatError::BadMagic).kind,
        ErrorKind::Format(FormatError::BadMagic)
    );
}

#[test]
fn error_file_not_found() {
    let err = Error::file_not_found("halflife2.fgd");
    assert_eq!(err.kind, ErrorKind::FileNotFound("halflife2.fgd".into()));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_source_only() {
    let err = Error::syntax("bad").with_context(ErrorContext::new().with_source("base.fgd"));
    assert_eq!(format!("{err}"), "syntax error: bad (in base.fgd)");
}

#[test]
fn context_position_only() {
    let err = Error::syntax("bad").with_context(ErrorContext::new().with_position(3, 7));
    assert_eq!(format!("{err}"), "syntax error: bad (at line 3, column 7)");
}

#[test]
fn empty_context_adds_nothing() {
    let err = Error::io("disk gone").with_context(ErrorContext::new());
    assert_eq!(format!("{err}"), "i/o error: disk gone");
}
