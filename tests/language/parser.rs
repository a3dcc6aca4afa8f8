//! Integration tests for the entity grammar

use fgdkit_foundation::{EntityCategory, ErrorKind, HelperKind, SemanticError, ValueType};
use fgdkit_language::{Loader, MemoryFs, ParseOptions, parse_str};
use fgdkit_schema::{BaseRef, Fgd, ValueList};

const INFO_TARGET: &str = r#"
@PointClass base(Targetname) = info_target : "A generic target"
[
    health(integer) : "Health" : 100 : "Hit points"
    spawnflags(flags) =
    [
        1 : "Start disabled" : 0
        2 : "Fancy" : 1
    ]
    output OnUser1(void) : "Fired on input"
]
"#;

/// Parses without linking bases, so undefined bases are allowed.
fn parse_unlinked(source: &str) -> Fgd {
    let fs = MemoryFs::new();
    let loader = Loader::new(&fs).with_options(ParseOptions::new().with_resolve_bases(false));
    let mut fgd = Fgd::new();
    loader.parse_source(&mut fgd, "test.fgd", source).unwrap();
    fgd
}

fn semantic(source: &str) -> SemanticError {
    match parse_str(source).unwrap_err().kind {
        ErrorKind::Semantic(err) => err,
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

// =============================================================================
// Accepted input
// =============================================================================

#[test]
fn info_target_scenario() {
    let fgd = parse_unlinked(INFO_TARGET);
    assert_eq!(fgd.len(), 1);

    let ent = fgd.get("info_target").unwrap();
    let def = ent.def();
    assert_eq!(def.classname, "info_target");
    assert_eq!(def.category, EntityCategory::Point);
    assert_eq!(def.bases, [BaseRef::Unresolved("targetname".into())]);
    assert_eq!(def.description, "A generic target");

    let health = &def.keyvalues["health"];
    assert_eq!(health.value_type, ValueType::Int);
    assert_eq!(health.display_name, "Health");
    assert_eq!(health.default, "100");
    assert_eq!(health.description, "Hit points");

    let flags = def.keyvalues["spawnflags"].flags();
    assert_eq!(flags.len(), 2);
    assert_eq!((flags[0].bit.value(), flags[0].default), (1, false));
    assert_eq!((flags[1].bit.value(), flags[1].default), (2, true));
    assert_eq!(flags[1].label, "Fancy");

    assert_eq!(def.outputs.len(), 1);
    let output = &def.outputs["onuser1"];
    assert_eq!(output.name, "OnUser1");
    assert_eq!(output.value_type, ValueType::Void);
    assert_eq!(output.description, "Fired on input");
    assert!(def.inputs.is_empty());
}

#[test]
fn helpers_are_recorded_in_order() {
    let fgd = parse_str(
        r#"@PointClass size(-16 -16 0, 16 16 72) color(0 255 0) studio("models/editor/playerstart.mdl") = info_player_start []"#,
    )
    .unwrap();
    let helpers = fgd.get("info_player_start").unwrap().helpers();
    let kinds: Vec<_> = helpers.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, [HelperKind::Size, HelperKind::Color, HelperKind::Model]);
    assert_eq!(helpers[0].args, ["-16 -16 0", "16 16 72"]);
}

#[test]
fn choices_with_default() {
    let fgd = parse_str(
        r#"@SolidClass = func_door [
    spawnpos(choices) : "Spawn Position" : 0 =
    [
        0 : "Closed"
        1 : "Open"
    ]
]"#,
    )
    .unwrap();
    let kv = fgd.get("func_door").unwrap().keyvalues().get("SpawnPos").unwrap();
    assert_eq!(kv.default, "0");
    let Some(ValueList::Choices(choices)) = &kv.values else {
        panic!("expected choices");
    };
    assert_eq!(choices.len(), 2);
    assert_eq!((choices[1].value.as_str(), choices[1].label.as_str()), ("1", "Open"));
}

#[test]
fn readonly_and_continuation() {
    let fgd = parse_str(
        r#"@PointClass = info_node [
    nodeid(integer) readonly : "Node ID" : : "Assigned by " +
        "the editor"
]"#,
    )
    .unwrap();
    let kv = fgd.get("info_node").unwrap().keyvalues().get("nodeid").unwrap().clone();
    assert!(kv.readonly);
    assert_eq!(kv.default, "");
    assert_eq!(kv.description, "Assigned by the editor");
}

#[test]
fn redefining_a_class_replaces_it() {
    let fgd = parse_str("@PointClass = a : \"one\" []\n@PointClass = A : \"two\" []").unwrap();
    assert_eq!(fgd.len(), 1);
    assert_eq!(fgd.get("a").unwrap().description(), "two");
}

// =============================================================================
// Rejected input
// =============================================================================

#[test]
fn unknown_value_type() {
    let err = semantic("@PointClass = weapon_x [ weapon(invalidtype) ]");
    assert_eq!(err, SemanticError::UnknownValueType("invalidtype".into()));
}

#[test]
fn flag_value_must_be_power_of_two() {
    let err = semantic("@PointClass = a [ spawnflags(flags) =\n[\n3 : \"Bad\" : 0\n]\n]");
    assert!(matches!(err, SemanticError::FlagNotPowerOfTwo { ref value, .. } if value == "3"));
}

#[test]
fn input_cannot_use_choices() {
    let err = semantic("@PointClass = a [ input SetSkin(choices) ]");
    assert!(matches!(err, SemanticError::ListTypeForIo(ValueType::Choices)));
}

#[test]
fn unknown_category() {
    let err = semantic("@WeirdClass = a []");
    assert_eq!(err, SemanticError::UnknownCategory("weirdclass".into()));
}

#[test]
fn unknown_helper() {
    let err = semantic("@PointClass wobble(1) = a []");
    assert_eq!(err, SemanticError::UnknownHelper("wobble".into()));
}

#[test]
fn list_type_needs_a_list() {
    let err = semantic("@PointClass = a [ spawnflags(flags) ]");
    assert!(matches!(err, SemanticError::MissingValueList { .. }));
}

#[test]
fn plain_type_rejects_a_list() {
    let err = semantic("@PointClass = a [ health(integer) =\n[\n]\n]");
    assert!(matches!(err, SemanticError::UnexpectedValueList { .. }));
}

#[test]
fn unterminated_block_is_syntax_error() {
    let err = parse_str("@PointClass = a [\n health(integer)\n").unwrap_err();
    assert!(err.is_syntax());
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("<string>"));
}
