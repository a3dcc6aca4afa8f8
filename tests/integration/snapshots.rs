//! Snapshots against the compact format

use fgdkit_binary::{decode, encode};
use fgdkit_language::parse_str;
use fgdkit_runtime::snapshot;

const SOURCE: &str = r#"
@BaseClass = Angles [ angles(angle) : "Pitch Yaw Roll" : "0 0 0" : "Orientation" ]
@PointClass base(Angles) studio("models/props/crate.mdl") = prop_crate : "A crate" [
    model(studio) : "Model" : "models/props/crate.mdl"
    output OnBreak(void) : "Fired when broken"
]
"#;

#[test]
fn snapshot_keeps_what_the_compact_format_drops() {
    let fgd = parse_str(SOURCE).unwrap();

    let restored = snapshot::from_bytes(&snapshot::to_bytes(&fgd).unwrap()).unwrap();
    assert_eq!(restored, fgd);
    let crate_ent = restored.get("prop_crate").unwrap();
    assert_eq!(crate_ent.description(), "A crate");
    assert_eq!(crate_ent.helpers().len(), 1);
    assert_eq!(
        crate_ent.keyvalues().get("angles").unwrap().description,
        "Orientation"
    );

    let compact = decode(&encode(&fgd).unwrap()).unwrap();
    let crate_ent = compact.get("prop_crate").unwrap();
    assert_eq!(crate_ent.description(), "");
    assert!(crate_ent.helpers().is_empty());
    assert_ne!(compact, fgd);
}

#[test]
fn snapshot_of_decoded_database() {
    let decoded = decode(&encode(&parse_str(SOURCE).unwrap()).unwrap()).unwrap();
    let restored = snapshot::from_bytes(&snapshot::to_bytes(&decoded).unwrap()).unwrap();
    assert_eq!(restored, decoded);
    assert!(restored.get("prop_crate").unwrap().is_a("angles"));
}
