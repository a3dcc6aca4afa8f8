//! Source files through the registry, the encoded format and back

use fgdkit_binary::{decode, encode};
use fgdkit_language::{MemoryFs, load};

fn game_files() -> MemoryFs {
    MemoryFs::new()
        .with_file(
            "base.fgd",
            r#"
@mapsize(-32768, 32768)
@BaseClass = Targetname [ targetname(target_source) : "Name" ]
@BaseClass = Parentname [ parentname(target_destination) : "Parent" ]
@BaseClass base(Targetname, Parentname) = Breakable [
    health(integer) : "Health" : 1
    input Break(void) : "Breaks it"
    output OnBreak(void) : "Fired when broken"
]
"#,
        )
        .with_file(
            "game.fgd",
            r#"
@include "base.fgd"
@SolidClass base(Breakable) = func_breakable : "A brush that breaks" [
    health(integer) : "Strength" : 50
    material(choices) : "Material" : 0 =
    [
        0 : "Glass"
        1 : "Wood"
    ]
]
"#,
        )
}

#[test]
fn inherited_members_merge_with_overrides() {
    let fgd = load(&game_files(), "game.fgd").unwrap();
    let ent = fgd.get("func_breakable").unwrap();

    assert_eq!(ent.keyvalues().get("health").unwrap().display_name, "Strength");
    assert_eq!(ent.keyvalues().keys().filter(|key| *key == "health").count(), 1);
    assert_eq!(
        ent.keyvalues().keys().collect::<Vec<_>>(),
        ["health", "material", "targetname", "parentname"]
    );
    assert!(ent.inputs().contains("BREAK"));
    assert!(ent.is_a("parentname"));
}

#[test]
fn encoded_database_matches_source() {
    let fgd = load(&game_files(), "game.fgd").unwrap();
    let decoded = decode(&encode(&fgd).unwrap()).unwrap();

    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded.map_size_max, 32768);
    let names: Vec<_> = decoded.iter().map(|ent| ent.classname().to_string()).collect();
    let expected: Vec<_> = fgd.iter().map(|ent| ent.classname().to_string()).collect();
    assert_eq!(names, expected);

    let ent = decoded.get("FUNC_BREAKABLE").unwrap();
    assert_eq!(ent.description(), "");
    assert_eq!(ent.keyvalues().get("health").unwrap().default, "50");
    assert_eq!(ent.keyvalues().get("material").unwrap().choices().len(), 2);
    assert_eq!(
        ent.outputs().get("onbreak").unwrap().description,
        "",
        "descriptions are not stored"
    );
}

#[test]
fn re_encoding_is_stable() {
    let fgd = load(&game_files(), "game.fgd").unwrap();
    let first = encode(&fgd).unwrap();
    let second = encode(&decode(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}
